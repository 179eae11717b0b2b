//! Lenient field extraction from venue JSON.
//!
//! Venue payloads mix types freely: numbers arrive as strings, strings as
//! numbers, optional fields as `null`, `""`, or simply absent. These helpers
//! extract typed values without ever failing on missing optional data, and
//! the `*_any` variants implement first-non-null resolution across the
//! synonym field names different endpoint versions use for the same concept
//! (`cTime` vs `ctime` vs `timestamp`).

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Extract a non-empty string. Numbers are stringified.
pub fn parse_string(data: &Value, key: &str) -> Option<String> {
    match data.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First non-null string across synonym keys, in the given order.
pub fn parse_string_any(data: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| parse_string(data, key))
}

/// Extract a decimal from a string or number field. Empty strings and
/// unparseable values yield `None`, never an error.
pub fn parse_decimal(data: &Value, key: &str) -> Option<Decimal> {
    match data.get(key)? {
        Value::String(s) if !s.is_empty() => Decimal::from_str(s.trim()).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    }
}

/// First non-null decimal across synonym keys, in the given order.
pub fn parse_decimal_any(data: &Value, keys: &[&str]) -> Option<Decimal> {
    keys.iter().find_map(|key| parse_decimal(data, key))
}

/// Extract an integer from a string or number field.
pub fn parse_int(data: &Value, key: &str) -> Option<i64> {
    match data.get(key)? {
        Value::String(s) if !s.is_empty() => s.trim().parse().ok(),
        Value::Number(n) => n.as_i64(),
        _ => None,
    }
}

/// Extract a millisecond timestamp from a string or number field.
///
/// Zero and negative values are treated as venue placeholders for "unset".
pub fn parse_timestamp(data: &Value, key: &str) -> Option<i64> {
    parse_int(data, key).filter(|ts| *ts > 0)
}

/// First non-null timestamp across synonym keys, in the given order.
pub fn parse_timestamp_any(data: &Value, keys: &[&str]) -> Option<i64> {
    keys.iter().find_map(|key| parse_timestamp(data, key))
}

/// Extract a boolean from a bool or `"true"`/`"false"` string field.
pub fn parse_bool(data: &Value, key: &str) -> Option<bool> {
    match data.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.as_str() {
            "true" | "TRUE" | "True" => Some(true),
            "false" | "FALSE" | "False" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_parse_string() {
        let data = json!({"a": "hello", "b": "", "c": 42, "d": null});
        assert_eq!(parse_string(&data, "a"), Some("hello".to_string()));
        assert_eq!(parse_string(&data, "b"), None);
        assert_eq!(parse_string(&data, "c"), Some("42".to_string()));
        assert_eq!(parse_string(&data, "d"), None);
        assert_eq!(parse_string(&data, "missing"), None);
    }

    #[test]
    fn test_parse_decimal_string_and_number() {
        let data = json!({"s": "123.45", "n": 0.5, "empty": "", "bad": "n/a"});
        assert_eq!(parse_decimal(&data, "s"), Some(dec!(123.45)));
        assert_eq!(parse_decimal(&data, "n"), Some(dec!(0.5)));
        assert_eq!(parse_decimal(&data, "empty"), None);
        assert_eq!(parse_decimal(&data, "bad"), None);
    }

    #[test]
    fn test_first_non_null_order() {
        let data = json!({"fillPrice": "100.5", "price": "99"});
        // fillPrice listed first wins even though both are present.
        assert_eq!(
            parse_decimal_any(&data, &["fillPrice", "price"]),
            Some(dec!(100.5))
        );
        // A null/absent first key falls through to the next synonym.
        let sparse = json!({"price": "99"});
        assert_eq!(
            parse_decimal_any(&sparse, &["fillPrice", "price"]),
            Some(dec!(99))
        );
        assert_eq!(parse_decimal_any(&sparse, &["a", "b"]), None);
    }

    #[test]
    fn test_parse_timestamp_rejects_placeholders() {
        let data = json!({"ts": "1700000000000", "zero": "0", "neg": -5});
        assert_eq!(parse_timestamp(&data, "ts"), Some(1700000000000));
        assert_eq!(parse_timestamp(&data, "zero"), None);
        assert_eq!(parse_timestamp(&data, "neg"), None);
    }

    #[test]
    fn test_parse_timestamp_any_synonyms() {
        let data = json!({"cTime": "1700000000000"});
        assert_eq!(
            parse_timestamp_any(&data, &["timestamp", "cTime", "ctime"]),
            Some(1700000000000)
        );
    }

    #[test]
    fn test_parse_bool() {
        let data = json!({"t": true, "s": "false", "u": "TRUE", "x": "yes"});
        assert_eq!(parse_bool(&data, "t"), Some(true));
        assert_eq!(parse_bool(&data, "s"), Some(false));
        assert_eq!(parse_bool(&data, "u"), Some(true));
        assert_eq!(parse_bool(&data, "x"), None);
    }

}
