//! Preference store trait for persisted display settings

use crate::core::error::PreferenceError;

/// Key-value store for user display preferences
///
/// Values are opaque strings; the engine parses what it reads and ignores
/// anything it cannot use. Implementations are injected into the view
/// rather than reached through a global.
pub trait PreferenceStore: Send + Sync {
    /// Read a stored value
    ///
    /// # Returns
    /// `Ok(None)` when nothing is stored under the key
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    /// Store a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Read a positive integer preference, ignoring absent or malformed values
pub fn read_positive(store: &dyn PreferenceStore, key: &str) -> Option<usize> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read preference");
            return None;
        }
    };

    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => Some(value),
        _ => {
            tracing::warn!(key, value = %raw, "ignoring malformed preference");
            None
        }
    }
}
