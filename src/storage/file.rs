use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{KeyValueStore, StorageError};

/// Store persisted as a single JSON object on disk.
///
/// Every write rewrites the whole file through a sibling temp file and an
/// atomic rename, so readers never observe a half-written object.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    // serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::File::open(&self.path) {
            Ok(f) => Ok(serde_json::from_reader(f)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(map_io(e, &self.path)),
        }
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let temp_path = temp_sibling(&self.path);

        let f = fs::File::create(&temp_path).map_err(|e| map_io(e, &temp_path))?;
        serde_json::to_writer_pretty(&f, entries)?;
        f.sync_all()?;

        fs::rename(&temp_path, &self.path).map_err(|e| map_io(e, &self.path))?;
        Ok(())
    }
}

/// `state.json` -> `state.json.tmp`, so stores differing only by extension
/// never share a temp file.
fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn map_io(e: std::io::Error, path: &Path) -> StorageError {
    if e.kind() == ErrorKind::PermissionDenied {
        StorageError::AccessDenied(path.display().to_string())
    } else {
        StorageError::Io(e)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }
}
