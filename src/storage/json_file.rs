//! JSON-file implementation of PreferenceStore
//!
//! The file holds a single JSON object of string values. It is read on every
//! `get` and rewritten on every `set`; preference traffic is a handful of
//! writes per session.

use crate::core::PreferenceStore;
use crate::core::error::PreferenceError;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Preference store backed by a JSON file
#[derive(Debug)]
pub struct JsonFilePreferenceStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFilePreferenceStore {
    /// Create a store for a file; the file is created on first `set`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        Ok(serde_json::from_str(&content)?)
    }
}

impl PreferenceStore for JsonFilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| PreferenceError::Lock("write"))?;

        let mut values = self.load()?;
        values.insert(key.to_string(), value.to_string());

        let content = serde_json::to_string_pretty(&values)?;
        std::fs::write(&self.path, content)?;

        tracing::debug!(key, path = %self.path.display(), "preference saved");
        Ok(())
    }
}
