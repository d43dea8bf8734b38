//! Transformer functions built on the document adapter.
//!
//! The function library proper lives outside the core; the two here cover
//! the adapter surface end to end (string extraction, comparator
//! selection) and match the semantics of their originals.

use serde_json::Value;

use json_transform_document::{as_string, comparator_for, ComparatorType};

/// Slice a string by character indices.
///
/// A negative `begin` counts from the end of the string (clamped at 0);
/// `end` is exclusive, clamps to the length, and counts from the end when
/// negative. A non-string scalar is sliced through its string rendering;
/// null yields `None`. An inverted range yields the empty string.
pub fn substring(value: &Value, begin: i64, end: Option<i64>) -> Option<Value> {
    let s = as_string(value)?;
    let chars: Vec<char> = s.chars().collect();
    let len = chars.len() as i64;

    let begin_index = if begin < 0 { (len + begin).max(0) } else { begin.min(len) };
    let end_index = match end {
        None => len,
        Some(e) => {
            let e = e.min(len);
            if e < 0 {
                (len + e).max(0)
            } else {
                e
            }
        }
    };
    let end_index = end_index.max(begin_index);
    let out: String = chars[begin_index as usize..end_index as usize].iter().collect();
    Some(Value::String(out))
}

/// The maximum of an array of values under the chosen comparator.
///
/// Null items take `default` (when provided); an empty or absent input
/// yields `None`.
pub fn max_of(items: &[Value], ty: ComparatorType, default: Option<&Value>) -> Option<Value> {
    if items.is_empty() {
        return None;
    }
    let cmp = comparator_for(ty);
    items
        .iter()
        .map(|item| {
            if item.is_null() {
                default.unwrap_or(item)
            } else {
                item
            }
        })
        .max_by(|a, b| cmp(a, b))
        .cloned()
}
