//! Persisted client state (cookie-like key/value pairs).
//!
//! The editor keeps exactly one piece of client state around between
//! sessions: the user's locale preference. The store abstraction keeps
//! that pluggable so hosts can back it with whatever their platform
//! offers (a cookie, a config file, local storage).

use crate::CommonError;
use std::collections::HashMap;
use std::path::PathBuf;

/// Key/value persistence for small client preferences
pub trait PreferenceStore {
    /// Read a value, `None` if never written
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, overwriting any previous one
    fn set(&mut self, key: &str, value: &str) -> Result<(), CommonError>;
}

/// File-backed store (one JSON object per file)
pub struct FilePreferenceStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl FilePreferenceStore {
    /// Open a store, loading existing values if the file is present
    pub fn open(path: PathBuf) -> Result<Self, CommonError> {
        let values = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            HashMap::new()
        };

        Ok(Self { path, values })
    }

    fn flush(&self) -> Result<(), CommonError> {
        let content = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CommonError> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

/// In-memory store for testing
#[derive(Default)]
pub struct MemoryPreferenceStore {
    pub values: HashMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CommonError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
