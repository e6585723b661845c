//! Free-text search across all columns of a record

use crate::config::TableConfig;
use crate::core::column::{CellContent, ColumnSchema, ColumnSpec, ColumnStyle};
use crate::core::value::{Record, format_timestamp, stringify, to_timestamp};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

fn whitespace() -> &'static Regex {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Strip all whitespace and case-fold
fn normalize(text: &str) -> String {
    whitespace().replace_all(text, "").to_lowercase()
}

/// A compiled free-text query
///
/// The query is matched as a literal substring after removing whitespace and
/// case-folding both sides, so `"new york"` finds `"NewYork"` and special
/// characters like `(` or `*` are never interpreted.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pattern: Option<Regex>,
}

impl SearchQuery {
    pub fn new(query: &str) -> Self {
        let needle = normalize(query);
        let pattern = if needle.is_empty() {
            None
        } else {
            // escaped input always compiles
            Regex::new(&regex::escape(&needle)).ok()
        };
        Self { pattern }
    }

    /// Whether the query matches everything
    pub fn is_empty(&self) -> bool {
        self.pattern.is_none()
    }

    pub fn matches_text(&self, text: &str) -> bool {
        match &self.pattern {
            Some(pattern) => pattern.is_match(&normalize(text)),
            None => true,
        }
    }

    /// Whether any column's derived text contains the query
    pub fn matches(&self, record: &Record, schema: &ColumnSchema, config: &TableConfig) -> bool {
        if self.is_empty() {
            return true;
        }

        schema.iter().any(|column| {
            record
                .get(&column.name)
                .and_then(|raw| search_text(column, raw, config))
                .is_some_and(|text| self.matches_text(&text))
        })
    }
}

/// Keep the records matching a free-text query, preserving order
pub fn search(
    query: &str,
    rows: &[Record],
    schema: &ColumnSchema,
    config: &TableConfig,
) -> Vec<Record> {
    let query = SearchQuery::new(query);
    if query.is_empty() {
        return rows.to_vec();
    }
    rows.iter()
        .filter(|row| query.matches(row, schema, config))
        .cloned()
        .collect()
}

/// Text a column contributes to search; `None` when it has no text form
pub fn search_text(column: &ColumnSpec, raw: &Value, config: &TableConfig) -> Option<String> {
    if let Some(extractor) = &column.search_extractor {
        return Some(extractor.extract(raw));
    }
    display_text(column, raw, config)
}

/// Display string of a cell as the host would show it
pub fn display_text(column: &ColumnSpec, raw: &Value, config: &TableConfig) -> Option<String> {
    match column.active_value_extractor().map(|e| e.extract(raw)) {
        Some(CellContent::Opaque(_)) => None,
        Some(CellContent::Value(value)) => value_text(&value, column.style, config),
        None => value_text(raw, column.style, config),
    }
}

fn value_text(value: &Value, style: ColumnStyle, config: &TableConfig) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Object(_) => Some(config.object_placeholder.clone()),
        _ if style.is_temporal() => {
            let format = match style {
                ColumnStyle::Date => &config.date_format,
                ColumnStyle::Time => &config.time_format,
                _ => &config.datetime_format,
            };
            to_timestamp(value, style)
                .and_then(|ms| format_timestamp(ms, format))
                .or_else(|| Some(stringify(value)))
        }
        other => Some(stringify(other)),
    }
}
