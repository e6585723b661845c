//! Decide per-record inclusion under a committed filter model

use crate::core::column::{ColumnStyle, IdentityExtractor};
use crate::core::value::{Record, as_number, is_primitive, strict_equals, stringify, to_timestamp};
use crate::filter::model::{
    FilterEntry, FilterModel, FilterVariant, MultiCheckFilter, RangeFilter, SingleSelectFilter,
};
use serde_json::Value;

/// Keep the records that pass every column filter, preserving order
pub fn apply_filters(rows: &[Record], model: &FilterModel) -> Vec<Record> {
    if model.is_unconstrained() {
        return rows.to_vec();
    }
    rows.iter()
        .filter(|row| record_passes(row, model))
        .cloned()
        .collect()
}

/// Whether a record passes all column filters of the model
///
/// Columns the record does not carry are not constrained.
pub fn record_passes(record: &Record, model: &FilterModel) -> bool {
    model.iter().all(|(column, entry)| match record.get(column) {
        Some(raw) => entry_passes(entry, raw),
        None => true,
    })
}

/// Whether one raw cell value satisfies one filter entry
pub fn entry_passes(entry: &FilterEntry, raw: &Value) -> bool {
    let effective = IdentityExtractor::effective(entry.identity_extractor(), raw);

    match entry.variant() {
        FilterVariant::Range(range) => range_passes(range, entry.style(), &effective),
        FilterVariant::MultiCheck(multi) => multi_check_passes(multi, &effective),
        FilterVariant::SingleSelect(select) => single_select_passes(select, &effective),
    }
}

fn range_passes(range: &RangeFilter, style: ColumnStyle, value: &Value) -> bool {
    if range.is_unconstrained() {
        return true;
    }

    let Some(x) = range_number(value, style) else {
        return false;
    };

    range.min.is_none_or(|min| min <= x) && range.max.is_none_or(|max| x <= max)
}

/// Numeric position of a value on a range axis
fn range_number(value: &Value, style: ColumnStyle) -> Option<f64> {
    if style.is_temporal() {
        return to_timestamp(value, style).map(|ms| ms as f64);
    }
    as_number(value).or_else(|| to_timestamp(value, style).map(|ms| ms as f64))
}

fn multi_check_passes(multi: &MultiCheckFilter, value: &Value) -> bool {
    let mut checked = multi.items.iter().filter(|item| item.checked).peekable();
    if checked.peek().is_none() {
        return true;
    }

    // objects and arrays cannot be matched against option keys
    if !is_primitive(value) {
        return true;
    }

    let key = stringify(value);
    checked.any(|item| item.value == key)
}

fn single_select_passes(select: &SingleSelectFilter, value: &Value) -> bool {
    match select.active_selection() {
        Some(selected) => strict_equals(value, selected),
        None => true,
    }
}
