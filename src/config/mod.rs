//! Configuration loading and management

use anyhow::{Result, bail};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

/// Display and pagination settings for a table view
///
/// Every key is optional in YAML; missing keys take the defaults below.
///
/// # Example
///
/// ```yaml
/// default_page_size: 25
/// page_size_options: [10, 25, 100]
/// date_format: "%d/%m/%Y"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Rows per page when no preference is stored
    pub default_page_size: usize,

    /// Page sizes the host offers to the user
    ///
    /// Informational: the view does not restrict page sizes to this list.
    pub page_size_options: Vec<usize>,

    /// `chrono` format for `date` columns
    pub date_format: String,

    /// `chrono` format for `datetime` columns
    pub datetime_format: String,

    /// `chrono` format for `time` columns
    pub time_format: String,

    /// Text searched for plain object cells
    pub object_placeholder: String,

    /// Preference store key holding the rows-per-page choice
    pub rows_per_page_key: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            page_size_options: vec![5, 10, 25, 50],
            date_format: "%Y-%m-%d".to_string(),
            datetime_format: "%Y-%m-%d %H:%M".to_string(),
            time_format: "%H:%M".to_string(),
            object_placeholder: "[object]".to_string(),
            rows_per_page_key: "rows_per_page".to_string(),
        }
    }
}

impl TableConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject date formats `chrono` cannot render
    pub fn validate(&self) -> Result<()> {
        for (key, format) in [
            ("date_format", &self.date_format),
            ("datetime_format", &self.datetime_format),
            ("time_format", &self.time_format),
        ] {
            if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
                bail!("invalid {}: '{}'", key, format);
            }
        }
        Ok(())
    }

    /// Page size used when nothing valid is stored, never zero
    pub fn fallback_page_size(&self) -> usize {
        self.default_page_size.max(1)
    }
}
