//! Preference store implementations for different backends

pub mod in_memory;
pub mod json_file;

pub use in_memory::InMemoryPreferenceStore;
pub use json_file::JsonFilePreferenceStore;
