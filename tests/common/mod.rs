//! Shared fixtures for integration tests

#![allow(dead_code)]

use rowsift::prelude::*;
use serde_json::Value;

/// Install a test subscriber once; honours `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Turn JSON object literals into records, skipping anything else
pub fn records(values: Vec<Value>) -> Vec<Record> {
    values
        .into_iter()
        .filter_map(|v| v.as_object().cloned())
        .collect()
}

/// Values of one column, in row order
pub fn column<'a>(rows: impl IntoIterator<Item = &'a Record>, name: &str) -> Vec<Value> {
    rows.into_iter()
        .map(|r| r.get(name).cloned().unwrap_or(Value::Null))
        .collect()
}

pub fn people_schema() -> ColumnSchema {
    ColumnSchema::new(vec![
        ColumnSpec::new("firstName", "First name"),
        ColumnSpec::new("lastName", "Last name").filterable(),
        ColumnSpec::new("age", "Age")
            .with_style(ColumnStyle::Number)
            .filterable(),
        ColumnSpec::new("status", "Status")
            .with_style(ColumnStyle::Select)
            .filterable(),
        ColumnSpec::new("joined", "Joined")
            .with_style(ColumnStyle::Date)
            .filterable(),
    ])
}

pub fn people() -> Vec<Record> {
    records(vec![
        serde_json::json!({
            "firstName": "Tanner",
            "lastName": "Smith",
            "age": 26,
            "status": "active",
            "joined": "2021-04-12"
        }),
        serde_json::json!({
            "firstName": "Kevin",
            "lastName": "Price",
            "age": 39,
            "status": "inactive",
            "joined": "2019-11-02"
        }),
        serde_json::json!({
            "firstName": "John",
            "lastName": "Smith",
            "age": 12,
            "status": "active",
            "joined": "2023-01-30"
        }),
        serde_json::json!({
            "firstName": "Mia",
            "lastName": "Lopez",
            "age": 45,
            "status": "pending",
            "joined": "not recorded"
        }),
    ])
}
