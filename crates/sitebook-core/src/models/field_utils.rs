//! Field extraction utilities for raw backend records
//!
//! The backend spells the same logical field several ways (`'Client ID'`,
//! `client_id`, `'ID'`, ...). Every alias lookup in the crate goes through the
//! helpers here, so the typed models never touch a raw field name directly.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Canonical identifier of a record.
///
/// Resolved once from whichever alias field carried it and compared by
/// equality only. Numeric ids are stored in their string form so that `42`
/// and `"42"` refer to the same record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Coerce a scalar JSON value into an identifier.
    /// Returns None for null, the empty string, and non-scalar values.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.is_empty() => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(number_to_id(n))),
            _ => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// Integral floats print as plain integer digits at any magnitude, so `7.0`
// matches `"7"` and `1e20` matches `"100000000000000000000"`.
fn number_to_id(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.is_finite() && f.fract() == 0.0 => format!("{:.0}", f),
        _ => n.to_string(),
    }
}

/// Resolve the canonical identifier of `record` from an ordered alias list.
///
/// Returns the first alias whose field is present and non-empty. Missing
/// fields, nulls and non-object records are tolerated and yield None.
pub fn resolve_id(record: &Value, aliases: &[&str]) -> Option<RecordId> {
    let fields = record.as_object()?;
    aliases
        .iter()
        .find_map(|alias| fields.get(*alias).and_then(RecordId::from_value))
}

/// First non-empty string among the aliases. Numbers are stringified.
pub fn resolve_str(record: &Value, aliases: &[&str]) -> Option<String> {
    let fields = record.as_object()?;
    aliases.iter().find_map(|alias| match fields.get(*alias)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Coerce an amount the way the console always has: a missing or null value
/// counts as zero, numeric strings are parsed, and anything that does not
/// yield a finite number counts as zero.
pub fn coerce_amount(value: Option<&Value>) -> f64 {
    let amount = match value {
        None | Some(Value::Null) => 0.0,
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        Some(Value::Array(_)) | Some(Value::Object(_)) => f64::NAN,
    };

    if amount.is_finite() {
        amount
    } else {
        0.0
    }
}

/// Amount stored under the first alias that is present on the record.
pub fn resolve_amount(record: &Value, aliases: &[&str]) -> f64 {
    let present = record
        .as_object()
        .and_then(|fields| aliases.iter().find_map(|alias| fields.get(*alias)));
    coerce_amount(present)
}

/// Nested list stored under the first alias holding an array.
pub fn resolve_list(record: &Value, aliases: &[&str]) -> Vec<Value> {
    record
        .as_object()
        .and_then(|fields| {
            aliases
                .iter()
                .find_map(|alias| fields.get(*alias).and_then(Value::as_array))
        })
        .cloned()
        .unwrap_or_default()
}

/// Calendar date from the first alias that parses as `YYYY-MM-DD` or RFC 3339.
pub fn resolve_date(record: &Value, aliases: &[&str]) -> Option<NaiveDate> {
    let fields = record.as_object()?;
    aliases.iter().find_map(|alias| {
        let raw = fields.get(*alias)?.as_str()?.trim();
        parse_date(raw)
    })
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    // "2024-03-01T10:00:00" without an offset
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CLIENT_ALIASES: &[&str] = &["Client ID", "client_id", "ID"];

    #[test]
    fn test_resolve_id_prefers_first_alias() {
        let record = json!({ "Client ID": "C1" });
        assert_eq!(resolve_id(&record, CLIENT_ALIASES), Some(RecordId::from("C1")));

        let both = json!({ "ID": "fallback", "Client ID": "C1" });
        assert_eq!(resolve_id(&both, CLIENT_ALIASES), Some(RecordId::from("C1")));
    }

    #[test]
    fn test_resolve_id_missing_aliases() {
        let record = json!({ "name": "Acme" });
        assert_eq!(resolve_id(&record, CLIENT_ALIASES), None);
        assert_eq!(resolve_id(&json!(null), CLIENT_ALIASES), None);
        assert_eq!(resolve_id(&json!([1, 2]), CLIENT_ALIASES), None);
    }

    #[test]
    fn test_resolve_id_skips_empty_values() {
        let record = json!({ "Client ID": "", "client_id": null, "ID": "C9" });
        assert_eq!(resolve_id(&record, CLIENT_ALIASES), Some(RecordId::from("C9")));
    }

    #[test]
    fn test_resolve_id_ignores_non_scalar_values() {
        let record = json!({ "Client ID": { "nested": 1 }, "client_id": true, "ID": 3 });
        assert_eq!(resolve_id(&record, CLIENT_ALIASES), Some(RecordId::from("3")));
    }

    #[test]
    fn test_numeric_and_string_ids_compare_equal() {
        let numeric = json!({ "ID": 42 });
        let float = json!({ "ID": 42.0 });
        let text = json!({ "ID": "42" });
        assert_eq!(resolve_id(&numeric, CLIENT_ALIASES), resolve_id(&text, CLIENT_ALIASES));
        assert_eq!(resolve_id(&float, CLIENT_ALIASES), resolve_id(&text, CLIENT_ALIASES));
    }

    #[test]
    fn test_large_float_ids_use_integer_digits() {
        let large = json!({ "ID": 1e20 });
        assert_eq!(
            resolve_id(&large, CLIENT_ALIASES),
            Some(RecordId::from("100000000000000000000"))
        );

        let past_old_cutoff = json!({ "ID": 1e16 });
        assert_eq!(
            resolve_id(&past_old_cutoff, CLIENT_ALIASES),
            resolve_id(&json!({ "ID": "10000000000000000" }), CLIENT_ALIASES)
        );

        let negative_zero = json!({ "ID": -0.0 });
        assert_eq!(resolve_id(&negative_zero, CLIENT_ALIASES), Some(RecordId::from("0")));
    }

    #[test]
    fn test_coerce_amount() {
        assert_eq!(coerce_amount(None), 0.0);
        assert_eq!(coerce_amount(Some(&json!(null))), 0.0);
        assert_eq!(coerce_amount(Some(&json!(12.5))), 12.5);
        assert_eq!(coerce_amount(Some(&json!("300"))), 300.0);
        assert_eq!(coerce_amount(Some(&json!(" 7.25 "))), 7.25);
        assert_eq!(coerce_amount(Some(&json!(""))), 0.0);
        assert_eq!(coerce_amount(Some(&json!("n/a"))), 0.0);
        assert_eq!(coerce_amount(Some(&json!({ "value": 3 }))), 0.0);
        assert_eq!(coerce_amount(Some(&json!(true))), 1.0);
    }

    #[test]
    fn test_resolve_amount_uses_first_present_alias() {
        let record = json!({ "Total Amount": "90", "total_amount": 100 });
        assert_eq!(resolve_amount(&record, &["total_amount", "Total Amount"]), 100.0);
        assert_eq!(resolve_amount(&json!({}), &["total_amount"]), 0.0);
    }

    #[test]
    fn test_resolve_str_and_list() {
        let record = json!({
            "Full Name": "  ",
            "name": "Jane Doe",
            "Photos": ["a.jpg", "b.jpg"],
        });
        assert_eq!(
            resolve_str(&record, &["Full Name", "name"]),
            Some("Jane Doe".to_string())
        );
        assert_eq!(resolve_list(&record, &["Photos", "photos"]).len(), 2);
        assert!(resolve_list(&record, &["Deficiencies"]).is_empty());
    }

    #[test]
    fn test_resolve_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1);
        assert_eq!(resolve_date(&json!({ "d": "2024-03-01" }), &["d"]), expected);
        assert_eq!(
            resolve_date(&json!({ "d": "2024-03-01T10:00:00Z" }), &["d"]),
            expected
        );
        assert_eq!(
            resolve_date(&json!({ "d": "2024-03-01T10:00:00" }), &["d"]),
            expected
        );
        assert_eq!(resolve_date(&json!({ "d": "soon" }), &["d"]), None);
    }
}
