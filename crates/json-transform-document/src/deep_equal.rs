use serde_json::Value;

use crate::big_dec::BigDec;

/// Deep equality over JSON values.
///
/// Arrays must match pairwise in order; objects must have the same key set
/// with equal values per key (key order does not matter for equality even
/// though it is preserved for output); numbers compare numerically at full
/// precision, so `1`, `1.0` and `1e0` are all equal.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => BigDec::of(a) == BigDec::of(b),
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| deep_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter().all(|(key, va)| match b.get(key) {
                    Some(vb) => deep_equal(va, vb),
                    None => false,
                })
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars() {
        assert!(deep_equal(&json!(null), &json!(null)));
        assert!(deep_equal(&json!("a"), &json!("a")));
        assert!(!deep_equal(&json!("a"), &json!("b")));
        assert!(!deep_equal(&json!(0), &json!(false)));
    }

    #[test]
    fn numbers_compare_numerically() {
        let a: Value = serde_json::from_str("1.0").unwrap();
        let b: Value = serde_json::from_str("1").unwrap();
        assert!(deep_equal(&a, &b));
        let c: Value = serde_json::from_str("1e0").unwrap();
        assert!(deep_equal(&b, &c));
        assert!(!deep_equal(&json!(1), &json!(2)));
    }

    #[test]
    fn arrays_are_ordered() {
        assert!(deep_equal(&json!([1, 2]), &json!([1, 2])));
        assert!(!deep_equal(&json!([1, 2]), &json!([2, 1])));
        assert!(!deep_equal(&json!([1]), &json!([1, 1])));
    }

    #[test]
    fn objects_ignore_key_order() {
        let a = serde_json::from_str::<Value>(r#"{"x": 1, "y": 2}"#).unwrap();
        let b = serde_json::from_str::<Value>(r#"{"y": 2, "x": 1}"#).unwrap();
        assert!(deep_equal(&a, &b));
        assert!(!deep_equal(&a, &json!({"x": 1})));
        assert!(!deep_equal(&a, &json!({"x": 1, "z": 2})));
    }

    #[test]
    fn nested_structures() {
        let a = json!({"a": [{"b": 1.0}]});
        let b = json!({"a": [{"b": 1}]});
        assert!(deep_equal(&a, &b));
    }

    #[test]
    fn extreme_exponents_compare_without_panicking() {
        let a: Value = serde_json::from_str("1e99999999999999999999").unwrap();
        let b: Value = serde_json::from_str("1e99999999999999999999").unwrap();
        assert!(deep_equal(&a, &b));
        let c: Value = serde_json::from_str("2").unwrap();
        assert!(!deep_equal(&a, &c));
    }
}
