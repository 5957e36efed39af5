//! Lenient deserializers for loosely-typed upstream fields.
//!
//! The record store is schema-free: booleans arrive as `true` or `"yes"`,
//! numbers as `42` or `"42"`, empty strings stand in for absent values. Every
//! helper here accepts all of those and never fails; values it cannot read
//! become `None` (or `false` for booleans).

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Read a boolean from `true`/`false`, `"yes"`/`"no"`, `"true"`/`"false"`, or `1`/`0`.
/// Anything else, including `null`, is `false`.
pub fn yes_no<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().is_some_and(truthy))
}

/// Truthiness rule used by [`yes_no`].
#[must_use]
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "yes" | "true" | "1"
        ),
        Value::Number(n) => n.as_i64() == Some(1),
        _ => false,
    }
}

/// Read an optional string; empty or whitespace-only strings become `None`.
/// Numbers are rendered to their decimal form.
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Read an optional non-negative integer from a number or numeric string.
pub fn opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Read an optional float from a number or numeric string.
pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    })
}

/// Read an optional timestamp from an RFC 3339 string or epoch milliseconds.
pub fn opt_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    })
}

/// Length of an optional list field; anything that is not a list counts as 0.
pub fn list_len<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.len(),
        _ => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "yes_no")]
        flag: bool,
        #[serde(default, deserialize_with = "opt_string")]
        text: Option<String>,
        #[serde(default, deserialize_with = "opt_u32")]
        whole: Option<u32>,
        #[serde(default, deserialize_with = "opt_f64")]
        real: Option<f64>,
        #[serde(default, deserialize_with = "opt_datetime")]
        at: Option<DateTime<Utc>>,
        #[serde(default, deserialize_with = "list_len")]
        items: usize,
    }

    fn probe(json: serde_json::Value) -> Probe {
        serde_json::from_value(json).expect("probe never fails")
    }

    #[rstest]
    #[case(serde_json::json!(true), true)]
    #[case(serde_json::json!(false), false)]
    #[case(serde_json::json!("yes"), true)]
    #[case(serde_json::json!("Yes"), true)]
    #[case(serde_json::json!("no"), false)]
    #[case(serde_json::json!("true"), true)]
    #[case(serde_json::json!(1), true)]
    #[case(serde_json::json!(null), false)]
    #[case(serde_json::json!({"nested": true}), false)]
    fn booleans_normalize(#[case] raw: serde_json::Value, #[case] expected: bool) {
        assert_eq!(probe(serde_json::json!({ "flag": raw })).flag, expected);
    }

    #[test]
    fn absent_fields_use_fallbacks() {
        let p = probe(serde_json::json!({}));
        assert!(!p.flag);
        assert!(p.text.is_none());
        assert!(p.whole.is_none());
        assert!(p.real.is_none());
        assert!(p.at.is_none());
        assert_eq!(p.items, 0);
    }

    #[test]
    fn blank_strings_are_absent() {
        assert!(probe(serde_json::json!({"text": "   "})).text.is_none());
        assert_eq!(
            probe(serde_json::json!({"text": 12})).text.as_deref(),
            Some("12")
        );
    }

    #[test]
    fn numbers_accept_strings() {
        let p = probe(serde_json::json!({"whole": "250", "real": "1,250.5"}));
        assert_eq!(p.whole, Some(250));
        assert_eq!(p.real, Some(1250.5));
        assert!(probe(serde_json::json!({"whole": -3})).whole.is_none());
    }

    #[test]
    fn datetimes_accept_iso_and_epoch_millis() {
        let iso = probe(serde_json::json!({"at": "2025-03-01T09:30:00.000Z"}));
        let ms = probe(serde_json::json!({"at": 1_740_821_400_000_i64}));
        assert_eq!(iso.at, ms.at);
        assert!(probe(serde_json::json!({"at": "last tuesday"})).at.is_none());
    }

    #[test]
    fn list_len_counts_arrays_only() {
        assert_eq!(probe(serde_json::json!({"items": ["a", "b"]})).items, 2);
        assert_eq!(probe(serde_json::json!({"items": "a"})).items, 0);
    }
}
