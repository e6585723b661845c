//! Record and cell value helpers
//!
//! Records are JSON objects. The helpers here give cell values the loose
//! conversions a table needs: stringification for option keys, numeric and
//! timestamp coercion for ranges and sorting.

use crate::core::column::ColumnStyle;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::{Map, Value};
use std::fmt::Write;

/// A single row of the dataset, keyed by column name
pub type Record = Map<String, Value>;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

/// Convert a value to the text used as an option key
///
/// Arrays are joined with `,` and objects collapse to a fixed marker, so two
/// distinct objects share the same key.
///
/// # Examples
///
/// ```
/// use rowsift::core::value::stringify;
/// use serde_json::json;
///
/// assert_eq!(stringify(&json!("Smith")), "Smith");
/// assert_eq!(stringify(&json!(26)), "26");
/// assert_eq!(stringify(&json!([1, "a"])), "1,a");
/// ```
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => stringify(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Whether the value is a scalar (string, number, boolean or null)
pub fn is_primitive(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

/// Strict equality without type coercion
///
/// Numbers compare by magnitude so `1` and `1.0` are equal, but `1` and
/// `"1"` are not.
pub fn strict_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

/// Coerce a JSON number or a numeric string to `f64`
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Coerce a date-like value to epoch milliseconds
///
/// Numbers are taken as epoch milliseconds. Strings may be RFC 3339, an ISO
/// date, an ISO datetime without offset (read as UTC) or a bare time of day
/// (placed on today's date). For [`ColumnStyle::Time`] the date portion is
/// always replaced by today so only the time of day matters.
pub fn to_timestamp(value: &Value, style: ColumnStyle) -> Option<i64> {
    let datetime = match value {
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            DateTime::from_timestamp_millis(millis)?.naive_utc()
        }
        Value::String(s) => parse_datetime(s.trim())?,
        _ => return None,
    };

    let datetime = if style == ColumnStyle::Time {
        today().and_time(datetime.time())
    } else {
        datetime
    };

    Some(datetime.and_utc().timestamp_millis())
}

/// Format epoch milliseconds with a `chrono` format string (UTC)
///
/// Returns `None` when the format string holds an unknown specifier.
pub fn format_timestamp(millis: i64, format: &str) -> Option<String> {
    let datetime = DateTime::from_timestamp_millis(millis)?;
    let mut out = String::new();
    write!(out, "{}", datetime.format(format)).ok()?;
    Some(out)
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt);
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
        .map(|time| today().and_time(time))
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stringify_scalars() {
        assert_eq!(stringify(&json!("a b")), "a b");
        assert_eq!(stringify(&json!(2.5)), "2.5");
        assert_eq!(stringify(&json!(true)), "true");
        assert_eq!(stringify(&json!(null)), "null");
    }

    #[test]
    fn test_stringify_compound() {
        assert_eq!(stringify(&json!([1, null, "x"])), "1,,x");
        assert_eq!(stringify(&json!({"a": 1})), "[object Object]");
    }

    #[test]
    fn test_strict_equals() {
        assert!(strict_equals(&json!(1), &json!(1.0)));
        assert!(!strict_equals(&json!(1), &json!("1")));
        assert!(strict_equals(&json!("x"), &json!("x")));
    }

    #[test]
    fn test_as_number() {
        assert_eq!(as_number(&json!(3)), Some(3.0));
        assert_eq!(as_number(&json!(" 4.5 ")), Some(4.5));
        assert_eq!(as_number(&json!("abc")), None);
        assert_eq!(as_number(&json!(null)), None);
    }

    #[test]
    fn test_to_timestamp_date_and_datetime() {
        let date = to_timestamp(&json!("2024-03-01"), ColumnStyle::Date).unwrap();
        let datetime =
            to_timestamp(&json!("2024-03-01T12:00:00Z"), ColumnStyle::DateTime).unwrap();
        assert_eq!(datetime - date, 12 * 60 * 60 * 1000);

        let naive = to_timestamp(&json!("2024-03-01 12:00"), ColumnStyle::DateTime).unwrap();
        assert_eq!(naive, datetime);
    }

    #[test]
    fn test_to_timestamp_number_is_epoch_millis() {
        assert_eq!(to_timestamp(&json!(86_400_000), ColumnStyle::Date), Some(86_400_000));
    }

    #[test]
    fn test_to_timestamp_time_ignores_date() {
        let a = to_timestamp(&json!("2001-01-01T08:30:00Z"), ColumnStyle::Time).unwrap();
        let b = to_timestamp(&json!("08:30"), ColumnStyle::Time).unwrap();
        assert_eq!(a, b);

        let later = to_timestamp(&json!("09:00:00"), ColumnStyle::Time).unwrap();
        assert!(later > b);
    }

    #[test]
    fn test_to_timestamp_rejects_garbage() {
        assert_eq!(to_timestamp(&json!("soon"), ColumnStyle::Date), None);
        assert_eq!(to_timestamp(&json!(""), ColumnStyle::Date), None);
        assert_eq!(to_timestamp(&json!({"d": 1}), ColumnStyle::Date), None);
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp(0, "%Y-%m-%d %H:%M").as_deref(),
            Some("1970-01-01 00:00")
        );
    }

    #[test]
    fn test_format_timestamp_bad_specifier() {
        assert_eq!(format_timestamp(0, "%Q"), None);
        assert_eq!(format_timestamp(0, "%Y-%"), None);
    }
}
