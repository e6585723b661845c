//! In-memory implementation of PreferenceStore for testing and embedding

use crate::core::PreferenceStore;
use crate::core::error::PreferenceError;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory preference store
///
/// Useful for testing and for hosts that persist preferences themselves.
/// Uses RwLock for thread-safe access; clones share the same map.
#[derive(Clone, Default)]
pub struct InMemoryPreferenceStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryPreferenceStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with values
    pub fn with_values<K, V>(values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: Arc::new(RwLock::new(
                values
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            )),
        }
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        let values = self
            .values
            .read()
            .map_err(|_| PreferenceError::Lock("read"))?;

        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut values = self
            .values
            .write()
            .map_err(|_| PreferenceError::Lock("write"))?;

        values.insert(key.to_string(), value.to_string());

        Ok(())
    }
}
