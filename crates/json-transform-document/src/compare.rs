use std::cmp::Ordering;

use serde_json::Value;

use crate::big_dec::BigDec;
use crate::extract::{as_big_dec, as_bool, as_string};

/// Kind-wise ordering of two values.
///
/// Comparable pairs: arrays order by length, objects by size, strings
/// lexicographically, numbers by decimal value, booleans false before
/// true, and null sorts before anything non-null. Everything else is
/// incomparable and returns `None`.
pub fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Array(x), Value::Array(y)) => Some(x.len().cmp(&y.len())),
        (Value::Object(x), Value::Object(y)) => Some(x.len().cmp(&y.len())),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Number(x), Value::Number(y)) => Some(BigDec::of(x).cmp(&BigDec::of(y))),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Null, b) if !b.is_null() => Some(Ordering::Less),
        (a, Value::Null) if !a.is_null() => Some(Ordering::Greater),
        _ => None,
    }
}

/// Total comparator over values: incomparable pairs compare equal so that
/// sorting mixed-kind arrays stays stable.
pub fn comparator() -> impl Fn(&Value, &Value) -> Ordering {
    |a, b| compare(a, b).unwrap_or(Ordering::Equal)
}

/// Per-call comparator selection for functions that order their input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComparatorType {
    /// The kind-wise [`compare`] ordering.
    #[default]
    Auto,
    /// Order by [`as_string`] rendering.
    String,
    /// Order by decimal value.
    Number,
    /// Order by boolean view, false before true.
    Bool,
}

/// Build the comparator for a [`ComparatorType`].
pub fn comparator_for(ty: ComparatorType) -> Box<dyn Fn(&Value, &Value) -> Ordering> {
    match ty {
        ComparatorType::Auto => Box::new(comparator()),
        ComparatorType::String => Box::new(|a, b| {
            as_string(a).unwrap_or_default().cmp(&as_string(b).unwrap_or_default())
        }),
        ComparatorType::Number => Box::new(|a, b| {
            as_big_dec(a)
                .unwrap_or_else(BigDec::zero)
                .cmp(&as_big_dec(b).unwrap_or_else(BigDec::zero))
        }),
        ComparatorType::Bool => {
            Box::new(|a, b| as_bool(a).unwrap_or(false).cmp(&as_bool(b).unwrap_or(false)))
        }
    }
}
