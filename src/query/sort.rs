//! Type-aware record ordering
//!
//! The rule applied to a pair of values is chosen in this order:
//!
//! 1. temporal columns compare timestamps; values that are not dates sort
//!    after dates in either direction
//! 2. two numbers compare numerically
//! 3. two objects use the column's comparator when it has one
//! 4. anything else compares as text, case-insensitively first
//!
//! Outside temporal columns, values of different kinds never reach rules 2-4
//! together: numbers come before text, and objects with a comparator come
//! after it, so a column mixing kinds still sorts in a total order.
//!
//! `Ascending` is natural order (smaller first) for every rule.

use crate::core::column::{ColumnSchema, ColumnSpec};
use crate::core::value::{Record, stringify, to_timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Orient a natural-order comparison
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Column and direction to sort by
///
/// Parses the `field`, `field:asc` and `field:desc` forms.
///
/// # Examples
///
/// ```
/// use rowsift::query::sort::{SortDirection, SortSpec};
///
/// let spec: SortSpec = "age:desc".parse().unwrap();
/// assert_eq!(spec.column, "age");
/// assert_eq!(spec.direction, SortDirection::Descending);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }

    pub fn ascending(column: impl Into<String>) -> Self {
        Self::new(column, SortDirection::Ascending)
    }

    pub fn descending(column: impl Into<String>) -> Self {
        Self::new(column, SortDirection::Descending)
    }

    /// Next sort after a header click: ascending, then descending, then none
    pub fn toggle(current: Option<&SortSpec>, column: &str) -> Option<SortSpec> {
        match current {
            Some(spec) if spec.column == column => match spec.direction {
                SortDirection::Ascending => Some(Self::descending(column)),
                SortDirection::Descending => None,
            },
            _ => Some(Self::ascending(column)),
        }
    }
}

impl FromStr for SortSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (column, direction) = match s.rsplit_once(':') {
            Some((column, "asc")) => (column, SortDirection::Ascending),
            Some((column, "desc")) => (column, SortDirection::Descending),
            Some((_, other)) => return Err(format!("unknown sort direction '{}'", other)),
            None => (s, SortDirection::Ascending),
        };

        if column.is_empty() {
            return Err("empty sort column".to_string());
        }
        Ok(Self::new(column, direction))
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        };
        write!(f, "{}:{}", self.column, direction)
    }
}

/// Build a record comparator for a column
///
/// Keys missing from the schema compare every pair as equal, which keeps the
/// input order under a stable sort.
pub fn compare<'a>(
    sort_key: &'a str,
    direction: SortDirection,
    schema: &'a ColumnSchema,
) -> impl Fn(&Record, &Record) -> Ordering + 'a {
    let column = schema.get(sort_key);
    move |a: &Record, b: &Record| match column {
        Some(column) => compare_values(
            column,
            a.get(sort_key).unwrap_or(&Value::Null),
            b.get(sort_key).unwrap_or(&Value::Null),
            direction,
        ),
        None => Ordering::Equal,
    }
}

/// Compare two cell values of a column
pub fn compare_values(
    column: &ColumnSpec,
    a: &Value,
    b: &Value,
    direction: SortDirection,
) -> Ordering {
    if column.style.is_temporal() {
        return match (to_timestamp(a, column.style), to_timestamp(b, column.style)) {
            (Some(x), Some(y)) => direction.apply(x.cmp(&y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
    }

    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or_default();
            let y = y.as_f64().unwrap_or_default();
            direction.apply(x.total_cmp(&y))
        }
        (Value::Object(_), Value::Object(_)) if column.comparator.is_some() => {
            let ordering = column
                .comparator
                .as_ref()
                .map_or(Ordering::Equal, |c| c.compare(a, b));
            direction.apply(ordering)
        }
        _ => {
            let ordering = kind_rank(column, a)
                .cmp(&kind_rank(column, b))
                .then_with(|| locale_compare(&sort_text(a), &sort_text(b)));
            direction.apply(ordering)
        }
    }
}

/// Ordering group of a value: numbers, then text, then comparable objects
fn kind_rank(column: &ColumnSpec, value: &Value) -> u8 {
    match value {
        Value::Number(_) => 0,
        Value::Object(_) if column.comparator.is_some() => 2,
        _ => 1,
    }
}

/// Stable in-place sort of records
pub fn sort_records(rows: &mut [Record], spec: &SortSpec, schema: &ColumnSchema) {
    rows.sort_by(compare(&spec.column, spec.direction, schema));
}

fn sort_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => stringify(other),
    }
}

/// Case-insensitive comparison; case-only ties put lowercase first
fn locale_compare(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| b.cmp(a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::column::ColumnStyle;
    use serde_json::json;

    fn rows(values: Vec<Value>) -> Vec<Record> {
        values.into_iter().filter_map(|v| v.as_object().cloned()).collect()
    }

    fn column_values(rows: &[Record], column: &str) -> Vec<Value> {
        rows.iter().map(|r| r.get(column).cloned().unwrap_or(Value::Null)).collect()
    }

    #[test]
    fn test_numeric_descending() {
        let schema = ColumnSchema::new(vec![
            ColumnSpec::new("age", "Age").with_style(ColumnStyle::Number),
        ]);
        let mut data = rows(vec![json!({"age": 26}), json!({"age": 12}), json!({"age": 39})]);
        sort_records(&mut data, &SortSpec::descending("age"), &schema);
        assert_eq!(column_values(&data, "age"), vec![json!(39), json!(26), json!(12)]);
    }

    #[test]
    fn test_numeric_ascending_mixed_int_float() {
        let schema = ColumnSchema::new(vec![ColumnSpec::new("n", "N")]);
        let mut data = rows(vec![json!({"n": 2.5}), json!({"n": 10}), json!({"n": -1})]);
        sort_records(&mut data, &SortSpec::ascending("n"), &schema);
        assert_eq!(column_values(&data, "n"), vec![json!(-1), json!(2.5), json!(10)]);
    }

    #[test]
    fn test_dates_follow_same_direction_convention() {
        let schema = ColumnSchema::new(vec![
            ColumnSpec::new("d", "D").with_style(ColumnStyle::Date),
        ]);
        let mut data = rows(vec![
            json!({"d": "2024-05-01"}),
            json!({"d": "2023-01-01"}),
            json!({"d": "2025-12-31"}),
        ]);
        sort_records(&mut data, &SortSpec::ascending("d"), &schema);
        assert_eq!(
            column_values(&data, "d"),
            vec![json!("2023-01-01"), json!("2024-05-01"), json!("2025-12-31")]
        );
    }

    #[test]
    fn test_invalid_dates_sort_last_in_both_directions() {
        let schema = ColumnSchema::new(vec![
            ColumnSpec::new("d", "D").with_style(ColumnStyle::DateTime),
        ]);
        let base = rows(vec![
            json!({"d": "never"}),
            json!({"d": "2024-05-01T10:00:00Z"}),
            json!({"d": "2023-01-01T10:00:00Z"}),
        ]);

        let mut asc = base.clone();
        sort_records(&mut asc, &SortSpec::ascending("d"), &schema);
        assert_eq!(asc[2].get("d"), Some(&json!("never")));

        let mut desc = base;
        sort_records(&mut desc, &SortSpec::descending("d"), &schema);
        assert_eq!(desc[0].get("d"), Some(&json!("2024-05-01T10:00:00Z")));
        assert_eq!(desc[2].get("d"), Some(&json!("never")));
    }

    #[test]
    fn test_time_columns_compare_time_of_day() {
        let schema = ColumnSchema::new(vec![
            ColumnSpec::new("t", "T").with_style(ColumnStyle::Time),
        ]);
        let mut data = rows(vec![
            json!({"t": "1999-01-01T18:00:00Z"}),
            json!({"t": "07:30"}),
            json!({"t": "2030-06-01T12:00:00Z"}),
        ]);
        sort_records(&mut data, &SortSpec::ascending("t"), &schema);
        assert_eq!(data[0].get("t"), Some(&json!("07:30")));
        assert_eq!(data[2].get("t"), Some(&json!("1999-01-01T18:00:00Z")));
    }

    #[test]
    fn test_custom_comparator_for_objects() {
        let schema = ColumnSchema::new(vec![ColumnSpec::new("size", "Size").with_comparator(|a, b| {
            let rank = |v: &Value| v.get("rank").and_then(Value::as_i64).unwrap_or_default();
            rank(a).cmp(&rank(b))
        })]);
        let mut data = rows(vec![
            json!({"size": {"label": "L", "rank": 3}}),
            json!({"size": {"label": "S", "rank": 1}}),
            json!({"size": {"label": "M", "rank": 2}}),
        ]);
        sort_records(&mut data, &SortSpec::ascending("size"), &schema);
        let labels: Vec<_> = data.iter().map(|r| r["size"]["label"].clone()).collect();
        assert_eq!(labels, vec![json!("S"), json!("M"), json!("L")]);
    }

    #[test]
    fn test_text_fallback_is_case_insensitive() {
        let schema = ColumnSchema::new(vec![ColumnSpec::new("name", "Name")]);
        let mut data = rows(vec![
            json!({"name": "bob"}),
            json!({"name": "Alice"}),
            json!({"name": "carol"}),
        ]);
        sort_records(&mut data, &SortSpec::ascending("name"), &schema);
        assert_eq!(
            column_values(&data, "name"),
            vec![json!("Alice"), json!("bob"), json!("carol")]
        );
    }

    #[test]
    fn test_mixed_numbers_and_text_sort_totally() {
        let schema = ColumnSchema::new(vec![ColumnSpec::new("v", "V")]);
        let values: Vec<Value> = (0..120)
            .map(|i| match i % 3 {
                0 => json!(i),
                1 => json!(format!("{}x", i)),
                _ => json!(i as f64 / 4.0),
            })
            .collect();
        let mut data = rows(values.iter().map(|v| json!({"v": v})).collect());

        sort_records(&mut data, &SortSpec::ascending("v"), &schema);

        let column = schema.get("v").unwrap();
        let sorted = column_values(&data, "v");
        let first_text = sorted.iter().position(Value::is_string).unwrap();
        assert_eq!(first_text, 80);
        assert!(sorted[..first_text].iter().all(Value::is_number));
        assert!(sorted[first_text..].iter().all(Value::is_string));
        for pair in sorted.windows(2) {
            let ordering = compare_values(column, &pair[0], &pair[1], SortDirection::Ascending);
            assert_ne!(ordering, Ordering::Greater);
        }

        sort_records(&mut data, &SortSpec::descending("v"), &schema);
        assert!(column_values(&data, "v")[..40].iter().all(Value::is_string));
    }

    #[test]
    fn test_comparator_objects_sort_after_other_values() {
        let schema = ColumnSchema::new(vec![ColumnSpec::new("size", "Size").with_comparator(|a, b| {
            let rank = |v: &Value| v.get("rank").and_then(Value::as_i64).unwrap_or_default();
            rank(a).cmp(&rank(b))
        })]);
        let values: Vec<Value> = (0..60)
            .map(|i| match i % 3 {
                0 => json!({"rank": i}),
                1 => json!(i),
                _ => json!("n/a"),
            })
            .collect();
        let mut data = rows(values.iter().map(|v| json!({"size": v})).collect());

        sort_records(&mut data, &SortSpec::ascending("size"), &schema);

        let sorted = column_values(&data, "size");
        assert!(sorted[..20].iter().all(Value::is_number));
        assert!(sorted[20..40].iter().all(Value::is_string));
        assert!(sorted[40..].iter().all(Value::is_object));
        assert_eq!(sorted[40], json!({"rank": 0}));
        assert_eq!(sorted[59], json!({"rank": 57}));
    }

    #[test]
    fn test_unknown_key_keeps_order() {
        let schema = ColumnSchema::new(vec![ColumnSpec::new("name", "Name")]);
        let mut data = rows(vec![json!({"x": 3}), json!({"x": 1}), json!({"x": 2})]);
        let before = data.clone();
        sort_records(&mut data, &SortSpec::descending("x"), &schema);
        assert_eq!(data, before);
    }

    #[test]
    fn test_sort_is_stable() {
        let schema = ColumnSchema::new(vec![ColumnSpec::new("k", "K")]);
        let mut data = rows(vec![
            json!({"k": "a", "id": 1}),
            json!({"k": "b", "id": 2}),
            json!({"k": "a", "id": 3}),
        ]);
        sort_records(&mut data, &SortSpec::ascending("k"), &schema);
        assert_eq!(column_values(&data, "id"), vec![json!(1), json!(3), json!(2)]);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("name".parse::<SortSpec>().unwrap(), SortSpec::ascending("name"));
        assert_eq!("a:b:desc".parse::<SortSpec>().unwrap(), SortSpec::descending("a:b"));
        assert!("name:sideways".parse::<SortSpec>().is_err());
        assert!(":asc".parse::<SortSpec>().is_err());
        assert_eq!(SortSpec::descending("age").to_string(), "age:desc");
    }

    #[test]
    fn test_toggle_cycles() {
        let first = SortSpec::toggle(None, "age");
        assert_eq!(first, Some(SortSpec::ascending("age")));
        let second = SortSpec::toggle(first.as_ref(), "age");
        assert_eq!(second, Some(SortSpec::descending("age")));
        assert_eq!(SortSpec::toggle(second.as_ref(), "age"), None);
        assert_eq!(
            SortSpec::toggle(second.as_ref(), "name"),
            Some(SortSpec::ascending("name"))
        );
    }
}
