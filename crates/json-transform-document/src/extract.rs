use serde_json::{Number, Value};

use crate::big_dec::BigDec;

/// String representation of a value.
///
/// `None` for null. Strings come back as-is (unquoted). Numbers render in
/// plain decimal: whole values without a fractional part or scientific
/// notation, decimal values with trailing zeros stripped but at least one
/// significant digit. Booleans render as `"true"`/`"false"`. Containers
/// render as JSON text.
pub fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(BigDec::of(n).to_plain_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

/// Narrowed numeric value, `None` for non-numbers.
pub fn as_f64(value: &Value) -> Option<f64> {
    value.as_number().and_then(Number::as_f64)
}

/// Full-precision decimal view, `None` for non-numbers.
pub fn as_big_dec(value: &Value) -> Option<BigDec> {
    value.as_number().map(BigDec::of)
}

/// Boolean view: booleans as-is, `"true"`/`"false"` strings coerce
/// (case-insensitive), everything else is `None`.
pub fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => {
            if s.eq_ignore_ascii_case("true") {
                Some(true)
            } else if s.eq_ignore_ascii_case("false") {
                Some(false)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Unwrap a node for a user-facing boundary.
///
/// Identity for everything except numbers when `reduce_big_decimals` is
/// set: exact integers narrow to `i64`, everything else to `f64`. This is
/// the only lossy numeric conversion in the crate.
pub fn unwrap_value(value: &Value, reduce_big_decimals: bool) -> Value {
    if !reduce_big_decimals {
        return value.clone();
    }
    match value {
        Value::Number(n) => {
            let dec = BigDec::of(n);
            if let Some(i) = dec.to_i64() {
                return Value::from(i);
            }
            match n.as_f64().and_then(Number::from_f64) {
                Some(f) => Value::Number(f),
                None => value.clone(),
            }
        }
        _ => value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_of_null_is_none() {
        assert_eq!(as_string(&json!(null)), None);
    }

    #[test]
    fn string_of_string_is_unquoted() {
        assert_eq!(as_string(&json!("hi")).unwrap(), "hi");
    }

    #[test]
    fn string_of_whole_float_has_no_fraction() {
        let v: Value = serde_json::from_str("1.0").unwrap();
        assert_eq!(as_string(&v).unwrap(), "1");
        let v: Value = serde_json::from_str("1e2").unwrap();
        assert_eq!(as_string(&v).unwrap(), "100");
    }

    #[test]
    fn string_of_decimal_strips_trailing_zeros() {
        let v: Value = serde_json::from_str("2.5000").unwrap();
        assert_eq!(as_string(&v).unwrap(), "2.5");
        let v: Value = serde_json::from_str("0.50").unwrap();
        assert_eq!(as_string(&v).unwrap(), "0.5");
    }

    #[test]
    fn string_of_bool() {
        assert_eq!(as_string(&json!(true)).unwrap(), "true");
        assert_eq!(as_string(&json!(false)).unwrap(), "false");
    }

    #[test]
    fn string_of_container_is_json() {
        assert_eq!(as_string(&json!({"a": [1]})).unwrap(), r#"{"a":[1]}"#);
    }

    #[test]
    fn bool_coerces_strings() {
        assert_eq!(as_bool(&json!("TRUE")), Some(true));
        assert_eq!(as_bool(&json!("false")), Some(false));
        assert_eq!(as_bool(&json!("yes")), None);
        assert_eq!(as_bool(&json!(1)), None);
    }

    #[test]
    fn unwrap_narrows_integers_to_i64() {
        let v: Value = serde_json::from_str("42.0").unwrap();
        assert_eq!(unwrap_value(&v, true), json!(42));
        assert_eq!(unwrap_value(&v, false), v);
    }

    #[test]
    fn unwrap_narrows_decimals_to_f64() {
        let v: Value = serde_json::from_str("0.250").unwrap();
        assert_eq!(unwrap_value(&v, true), json!(0.25));
    }

    #[test]
    fn unwrap_leaves_non_numbers_alone() {
        assert_eq!(unwrap_value(&json!("1.0"), true), json!("1.0"));
        assert_eq!(unwrap_value(&json!([1]), true), json!([1]));
    }
}
