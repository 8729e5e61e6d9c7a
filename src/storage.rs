//! Persistence for the store's snapshot.
//!
//! The store only sees the `Storage` trait. `JsonFileStorage` keeps the
//! snapshot as one pretty-printed JSON document on disk; `MemoryStorage`
//! keeps it in memory for tests and throwaway sessions.

use std::cell::RefCell;
use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use crate::db::Snapshot;
use crate::error::StorageError;

/// A durable slot holding one snapshot.
pub trait Storage {
    /// Read the stored snapshot. `Ok(None)` means nothing has been stored yet.
    fn load(&self) -> Result<Option<Snapshot>, StorageError>;

    /// Replace the stored snapshot.
    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError>;
}

/// Snapshot stored as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStorage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Storage for JsonFileStorage {
    fn load(&self) -> Result<Option<Snapshot>, StorageError> {
        let mut buf = String::new();
        match File::open(&self.path) {
            Ok(mut f) => {
                f.read_to_string(&mut buf).map_err(|e| self.io_err(e))?;
            }
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_err(e)),
        }
        let snapshot = serde_json::from_str(&buf)?;
        Ok(Some(snapshot))
    }

    /// Atomic-ish write via temp + rename.
    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }
        let data = serde_json::to_string_pretty(snapshot)?;
        let tmp = self.path.with_extension("json.tmp");
        let mut f = File::create(&tmp).map_err(|e| self.io_err(e))?;
        f.write_all(data.as_bytes()).map_err(|e| self.io_err(e))?;
        f.flush().map_err(|e| self.io_err(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_err(e))?;
        Ok(())
    }
}

/// Snapshot stored in memory, serialized the same way as on disk.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: RefCell<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with raw contents in the slot, parsable or not.
    pub fn with_contents(raw: &str) -> Self {
        MemoryStorage {
            slot: RefCell::new(Some(raw.to_string())),
        }
    }

    /// The raw serialized contents of the slot.
    pub fn contents(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Option<Snapshot>, StorageError> {
        match self.slot.borrow().as_deref() {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        let raw = serde_json::to_string(snapshot)?;
        *self.slot.borrow_mut() = Some(raw);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_snapshot;

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("nested").join("state.json"));
        assert!(storage.load().unwrap().is_none());

        let snapshot = seed_snapshot();
        storage.save(&snapshot).unwrap();
        let loaded = storage.load().unwrap().unwrap();
        assert_eq!(loaded, snapshot);
        assert!(!storage.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn test_file_layout_uses_camel_case_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("state.json"));
        storage.save(&seed_snapshot()).unwrap();

        let raw = fs::read_to_string(storage.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["projects"][0]["assignedEmployees"][1], "2");
        assert_eq!(value["tasks"][0]["assignedEmployeeId"], "2");
        assert_eq!(value["tasks"][0]["status"], "inProgress");
        assert_eq!(value["employees"][0]["profileImage"], "https://picsum.photos/id/1/200");
    }

    #[test]
    fn test_file_unparsable_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{ not json").unwrap();
        let storage = JsonFileStorage::new(&path);
        assert!(matches!(storage.load(), Err(StorageError::Json(_))));
    }

    #[test]
    fn test_missing_reference_images_default_to_empty() {
        let raw = r#"{"employees":[],"projects":[],"tasks":[{
            "id":"7","title":"T","description":"D","projectId":"1",
            "assignedEmployeeId":"1","eta":"2025-05-01","status":"reOpen"}]}"#;
        let storage = MemoryStorage::with_contents(raw);
        let snapshot = storage.load().unwrap().unwrap();
        assert!(snapshot.tasks[0].reference_images.is_empty());
    }

    #[test]
    fn test_memory_round_trip() {
        let storage = MemoryStorage::new();
        assert!(storage.load().unwrap().is_none());
        storage.save(&seed_snapshot()).unwrap();
        assert_eq!(storage.load().unwrap(), Some(seed_snapshot()));
    }
}
