use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::{KeyValueStore, StorageError};

/// Local-storage key holding the JSON array of reported experiment names.
pub const EXPOSURE_LOG_KEY: &str = "logged-site-experiments";

#[derive(Debug, Error)]
pub enum ExposureLogError {
    #[error("Exposure log storage unavailable: {0}")]
    Storage(#[from] StorageError),
    #[error("Malformed exposure log: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Experiment names already reported for this visitor.
///
/// Append-only, insertion ordered, no duplicates. Serialized as a plain JSON
/// array of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExposureLog {
    names: Vec<String>,
}

impl ExposureLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a persisted log. Duplicate names collapse to their first
    /// occurrence.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        let names: Vec<String> = serde_json::from_str(raw)?;

        let mut log = ExposureLog::new();
        for name in names {
            log.insert(name);
        }
        Ok(log)
    }

    /// Read the log from `store`. A missing key is an empty log.
    pub fn load(store: &dyn KeyValueStore) -> Result<Self, ExposureLogError> {
        match store.get(EXPOSURE_LOG_KEY)? {
            Some(raw) => Ok(Self::parse(&raw)?),
            None => Ok(Self::new()),
        }
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&self.names)?;
        store.set(EXPOSURE_LOG_KEY, &raw)
    }

    pub fn contains(&self, experiment_name: &str) -> bool {
        self.names.iter().any(|n| n == experiment_name)
    }

    /// Returns `false` when the name was already present.
    pub fn insert(&mut self, experiment_name: impl Into<String>) -> bool {
        let name = experiment_name.into();
        if self.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
