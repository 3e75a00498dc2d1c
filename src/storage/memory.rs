use std::collections::BTreeMap;
use std::sync::RwLock;

use super::{KeyValueStore, StorageError};

/// In-process store. `read_only` stores reject every write, the way a
/// browser with blocked cookies silently drops them.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read_only() -> Self {
        Self {
            entries: RwLock::default(),
            read_only: true,
        }
    }

    /// Seed an entry, bypassing the read-only flag.
    pub fn with_entry(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::AccessDenied(key.to_string()));
        }
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store whose every access fails, e.g. local storage disabled by privacy
/// settings.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeniedStore;

impl KeyValueStore for DeniedStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::AccessDenied(key.to_string()))
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::AccessDenied(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get() {
        let store = MemoryStore::new();
        store.set("anonId", "abc-123").unwrap();
        assert_eq!(store.get("anonId").unwrap().as_deref(), Some("abc-123"));
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn read_only_rejects_writes_but_serves_seeded_entries() {
        let store = MemoryStore::read_only().with_entry("anonId", "seeded");
        assert!(matches!(store.set("anonId", "other"), Err(StorageError::AccessDenied(_))));
        assert_eq!(store.get("anonId").unwrap().as_deref(), Some("seeded"));
    }

    #[test]
    fn denied_store_fails_everything() {
        assert!(matches!(DeniedStore.get("k"), Err(StorageError::AccessDenied(_))));
        assert!(matches!(DeniedStore.set("k", "v"), Err(StorageError::AccessDenied(_))));
    }
}
