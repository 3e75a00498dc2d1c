//! Persisted key-value storage the bucketer reads and writes.
//!
//! Browsers expose two such stores, cookies (anonymous id) and local storage
//! (exposure log). Both are modeled by [`KeyValueStore`] so tests and server
//! builds can substitute their own.

pub mod file;
pub mod memory;

use thiserror::Error;

pub use file::JsonFileStore;
pub use memory::{DeniedStore, MemoryStore};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Access to storage key denied: {0}")]
    AccessDenied(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// String-keyed, string-valued persistent store.
///
/// Implementations lock internally; a single store is shared between every
/// experiment running on a page.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
