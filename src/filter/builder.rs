//! Derive a filter model from a dataset and its column schema

use crate::core::column::{CellContent, ColumnSchema, ColumnSpec};
use crate::core::value::{Record, stringify};
use crate::filter::model::{FilterEntry, FilterModel, FilterVariant};
use serde_json::Value;

/// Build a fresh, unconstrained filter model
///
/// One entry is created per filterable column. Checkbox and dropdown entries
/// are populated with the distinct identities observed in the dataset, in
/// first-seen order; range entries get no options.
///
/// # Examples
///
/// ```
/// use rowsift::core::column::{ColumnSchema, ColumnSpec};
/// use rowsift::filter::build_filter_model;
/// use serde_json::json;
///
/// let schema = ColumnSchema::new(vec![ColumnSpec::new("city", "City").filterable()]);
/// let rows = vec![
///     json!({"city": "Oslo"}).as_object().unwrap().clone(),
///     json!({"city": "Oslo"}).as_object().unwrap().clone(),
/// ];
/// let model = build_filter_model(&rows, &schema);
/// assert_eq!(model.len(), 1);
/// ```
pub fn build_filter_model(rows: &[Record], schema: &ColumnSchema) -> FilterModel {
    let mut model = FilterModel::new();

    for column in schema.filterable() {
        let mut entry = FilterEntry::for_column(column);
        populate(&mut entry, column, rows);
        model.insert(column.name.clone(), entry);
    }

    tracing::debug!(
        columns = model.len(),
        rows = rows.len(),
        "built filter model"
    );

    model
}

fn populate(entry: &mut FilterEntry, column: &ColumnSpec, rows: &[Record]) {
    if matches!(entry.variant(), FilterVariant::Range(_)) {
        return;
    }

    for (index, row) in rows.iter().enumerate() {
        let raw = row.get(&column.name);

        let Some(label) = label_for(column, raw) else {
            continue;
        };

        let identity = identity_for(column, raw, index);

        match entry.variant_mut() {
            FilterVariant::MultiCheck(multi) => {
                multi.push_unique(identity, label);
            }
            FilterVariant::SingleSelect(select) => {
                select.push_unique(identity, label);
            }
            FilterVariant::Range(_) => {}
        }
    }
}

/// Stringified identity: extractor key, else the value, else the row index
fn identity_for(column: &ColumnSpec, raw: Option<&Value>, index: usize) -> String {
    let raw = raw.unwrap_or(&Value::Null);
    if let Some(key) = column
        .identity_extractor
        .as_ref()
        .and_then(|extractor| extractor.extract(raw))
    {
        return key;
    }

    match raw {
        Value::Null => index.to_string(),
        value => stringify(value),
    }
}

/// Option label: search text, else the rendered value, else the raw value
fn label_for(column: &ColumnSpec, raw: Option<&Value>) -> Option<CellContent> {
    let label = match (&column.search_extractor, column.active_value_extractor()) {
        (Some(search), _) => CellContent::Value(Value::String(
            search.extract(raw.unwrap_or(&Value::Null)),
        )),
        (None, Some(render)) => render.extract(raw.unwrap_or(&Value::Null)),
        (None, None) => CellContent::Value(raw?.clone()),
    };

    (!label.is_null()).then_some(label)
}
