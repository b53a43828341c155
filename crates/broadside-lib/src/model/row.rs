//! Accessors over untyped remote rows.
//!
//! The row-store answers with `serde_json::Map` values; these helpers apply
//! the coercion rules every normalizer shares: numeric fields accept real
//! numbers or numeric-looking strings, nullable descriptive fields read as
//! `None` when absent or JSON `null`, and booleans default explicitly.

use serde_json::Value;

use crate::source::RawRow;

/// Numeric field, coercing numeric-looking strings. `None` when the field is
/// absent or not numeric.
pub fn num(row: &RawRow, key: &str) -> Option<f64> {
    match row.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Numeric field with a fallback for absent or malformed values.
pub fn num_or(row: &RawRow, key: &str, default: f64) -> f64 {
    num(row, key).unwrap_or(default)
}

/// Integer field, coercing numeric-looking strings and truncating floats.
pub fn int(row: &RawRow, key: &str) -> Option<i64> {
    match row.get(key)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    }
}

pub fn int_or(row: &RawRow, key: &str, default: i64) -> i64 {
    int(row, key).unwrap_or(default)
}

/// Required string field. `None` when absent, null, or not a string.
pub fn string<'a>(row: &'a RawRow, key: &str) -> Option<&'a str> {
    row.get(key).and_then(Value::as_str)
}

/// Nullable descriptive field: absent and JSON `null` both read as `None`,
/// and an empty string is preserved as `None` rather than an empty value.
pub fn opt_string(row: &RawRow, key: &str) -> Option<String> {
    match string(row, key) {
        Some(s) if !s.is_empty() => Some(s.to_string()),
        _ => None,
    }
}

/// Boolean field with an explicit default.
pub fn boolean(row: &RawRow, key: &str, default: bool) -> bool {
    row.get(key).and_then(Value::as_bool).unwrap_or(default)
}
