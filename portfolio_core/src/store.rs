//! Persistent store - one opaque key holding the progression record.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Key under which the progression record is stored.
pub const STORAGE_KEY: &str = "stackdarker.portfolio.progress.v1";

/// A key-value byte store that survives across sessions.
///
/// Each implementation is bound to a single key; records are opaque JSON text.
pub trait ProgressStore {
    /// Read the stored record, `None` if nothing was stored.
    fn load(&self) -> Result<Option<String>, StoreError>;

    /// Replace the stored record.
    fn save(&mut self, record: &str) -> Result<(), StoreError>;

    /// Delete the stored record. Clearing an absent record is not an error.
    fn clear(&mut self) -> Result<(), StoreError>;
}

impl<T: ProgressStore + ?Sized> ProgressStore for Box<T> {
    fn load(&self) -> Result<Option<String>, StoreError> {
        (**self).load()
    }

    fn save(&mut self, record: &str) -> Result<(), StoreError> {
        (**self).save(record)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        (**self).clear()
    }
}

/// In-memory store. Can simulate disabled storage.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    record: Option<String>,
    available: bool,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            record: None,
            available: true,
        }
    }

    /// Create a store already holding a record.
    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            record: Some(record.into()),
            available: true,
        }
    }

    /// Create a store on which every operation fails.
    pub fn unavailable() -> Self {
        Self {
            record: None,
            available: false,
        }
    }

    /// The currently stored record.
    pub fn record(&self) -> Option<&str> {
        self.record.as_deref()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.available {
            Ok(())
        } else {
            Err(StoreError::Unavailable)
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        self.check()?;
        Ok(self.record.clone())
    }

    fn save(&mut self, record: &str) -> Result<(), StoreError> {
        self.check()?;
        self.record = Some(record.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.check()?;
        self.record = None;
        Ok(())
    }
}

/// File-backed store: `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", key)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for FileStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, record: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        // Readers never observe a half-written record.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, record)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
