use serde_json::Value;

use crate::big_dec::BigDec;

/// Truthiness of a value.
///
/// With `javascript_style` (the default), the rules follow JavaScript:
/// containers are truthy iff non-empty, booleans are themselves, numbers
/// are truthy iff non-zero, strings iff non-empty, null is false. In
/// strict mode a string is truthy only when it spells `true`
/// (case-insensitive), the `Boolean.parseBoolean` rule.
pub fn is_truthy(value: &Value, javascript_style: bool) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => !BigDec::of(n).is_zero(),
        Value::String(s) => {
            if javascript_style {
                !s.is_empty()
            } else {
                s.eq_ignore_ascii_case("true")
            }
        }
        Value::Array(arr) => !arr.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// [`is_truthy`] with the JavaScript-style default.
pub fn truthy(value: &Value) -> bool {
    is_truthy(value, true)
}
