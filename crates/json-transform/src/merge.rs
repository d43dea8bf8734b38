//! Path-addressed deep merge.
//!
//! [`merge_into`] walks a dotted/bracketed path into a root object,
//! creating missing intermediate objects on the way, and merges a value at
//! the addressed location. Collisions with arrays append; collisions with
//! scalars promote the binding to an array holding both values.

use std::collections::VecDeque;

use serde_json::map::Entry;
use serde_json::Value;
use thiserror::Error;

use json_transform_document::deep_equal;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// The walk had to descend at `segment` but the node there is not an
    /// object.
    #[error("cannot merge into non-object at segment {segment:?}")]
    NotAnObject { segment: String },
}

/// Tokenize a path into its segments.
///
/// A `.` separates segments only at bracket/quote depth zero (and only
/// after at least one buffered character, so repeated dots collapse). A
/// `[` opens a bracket context closed by its matching `]`; inside it, `'`
/// or `"` open quoted regions closed by the matching quote. Delimiter
/// characters themselves are consumed, so `a['b.c']` yields the segments
/// `a` and `b.c`. Blank input yields no segments.
///
/// The output is consumed from the front by the merge walk and from the
/// back by the shell builder.
pub fn extract_path(path: &str) -> VecDeque<String> {
    let mut segments = VecDeque::new();
    if path.trim().is_empty() {
        return segments;
    }
    let mut buf = String::new();
    let mut expecting: Vec<char> = Vec::new();

    for c in path.chars() {
        if c == '.' && expecting.is_empty() && !buf.is_empty() {
            segments.push_back(std::mem::take(&mut buf));
        } else if c == '[' && expecting.is_empty() {
            expecting.push(']');
        } else if expecting.last() == Some(&c) {
            expecting.pop();
        } else if c == '\'' || c == '"' {
            expecting.push(c);
        } else {
            buf.push(c);
        }
    }
    if !buf.is_empty() {
        segments.push_back(buf);
    }
    segments
}

/// Build the missing-path shell for a value: each segment popped from the
/// back wraps the running value in `{segment: value}`, so `a.b` around `v`
/// yields `{"a":{"b":v}}`.
fn wrap_remaining(value: Value, location: &mut VecDeque<String>) -> Value {
    let mut elm = value;
    while let Some(point) = location.pop_back() {
        let mut obj = serde_json::Map::new();
        obj.insert(point, elm);
        elm = Value::Object(obj);
    }
    elm
}

/// Merge `value` into `root` at `path`, creating any missing path elements.
///
/// Rules, applied while walking segments front to back:
///
/// - a lone `$` segment denotes the root and is skipped;
/// - a missing segment binds the wrapped shell of the value and finishes;
/// - an object child is descended into;
/// - an array child absorbs the (wrapped) value by append;
/// - a scalar child is promoted: the binding becomes an array of the old
///   scalar and the (wrapped) value — except at the leaf, where merging a
///   value equal to the existing binding just re-assigns it;
/// - when the walk ends on an object and `value` is also an object, their
///   keys union shallowly (`value` wins on clash). The union is
///   deliberately shallow; depth comes from the path walk, not from
///   recursing both trees.
///
/// A null `value` (or null `root`) leaves `root` untouched.
pub fn merge_into(mut root: Value, value: &Value, path: &str) -> Result<Value, MergeError> {
    if value.is_null() || root.is_null() {
        return Ok(root);
    }
    walk(&mut root, extract_path(path), value)?;
    Ok(root)
}

fn walk(object: &mut Value, mut location: VecDeque<String>, value: &Value) -> Result<(), MergeError> {
    while location.front().map(String::as_str) == Some("$") {
        location.pop_front();
    }

    let Some(point) = location.pop_front() else {
        // walk ended on this node: union an object value into it
        if let Value::Object(incoming) = value {
            let map = match object {
                Value::Object(map) => map,
                _ => return Err(MergeError::NotAnObject { segment: "$".to_string() }),
            };
            for (key, val) in incoming {
                map.insert(key.clone(), val.clone());
            }
        }
        return Ok(());
    };

    let map = match object {
        Value::Object(map) => map,
        _ => return Err(MergeError::NotAnObject { segment: point }),
    };
    let at_leaf = location.is_empty();

    match map.entry(point) {
        Entry::Vacant(slot) => {
            let elm = wrap_remaining(value.clone(), &mut location);
            if !elm.is_null() {
                slot.insert(elm);
            }
            Ok(())
        }
        Entry::Occupied(mut slot) => {
            let current = slot.get_mut();
            if at_leaf && !value.is_object() {
                match current {
                    Value::Array(arr) => arr.push(value.clone()),
                    cur if deep_equal(cur, value) => *cur = value.clone(),
                    cur => {
                        let existing = cur.take();
                        *cur = Value::Array(vec![existing, value.clone()]);
                    }
                }
                return Ok(());
            }
            if current.is_object() {
                return walk(current, location, value);
            }
            match current {
                Value::Array(arr) => {
                    arr.push(wrap_remaining(value.clone(), &mut location));
                }
                cur => {
                    let existing = cur.take();
                    *cur = Value::Array(vec![
                        existing,
                        wrap_remaining(value.clone(), &mut location),
                    ]);
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn segments(path: &str) -> Vec<String> {
        extract_path(path).into_iter().collect()
    }

    #[test]
    fn tokenizer_splits_on_top_level_dots() {
        assert_eq!(segments("a.b.c"), ["a", "b", "c"]);
        assert_eq!(segments("$.a.b"), ["$", "a", "b"]);
        assert_eq!(segments("a"), ["a"]);
    }

    #[test]
    fn tokenizer_ignores_dots_in_brackets_and_quotes() {
        assert_eq!(segments("a['b.c']"), ["ab.c"]);
        assert_eq!(segments("a.b['c.d']"), ["a", "bc.d"]);
        assert_eq!(segments(r#"x["y.z"].w"#), ["xy.z", "w"]);
    }

    #[test]
    fn tokenizer_blank_input_is_empty() {
        assert!(segments("").is_empty());
        assert!(segments("   ").is_empty());
    }

    #[test]
    fn tokenizer_collapses_repeated_dots() {
        assert_eq!(segments("a..b"), ["a", "b"]);
        assert_eq!(segments(".a"), ["a"]);
    }

    #[test]
    fn merge_creates_nested_objects() {
        let out = merge_into(json!({}), &json!("V"), "a.b.c").unwrap();
        assert_eq!(out, json!({"a": {"b": {"c": "V"}}}));
    }

    #[test]
    fn merge_skips_root_segment() {
        let out = merge_into(json!({}), &json!(1), "$.a").unwrap();
        assert_eq!(out, json!({"a": 1}));
    }

    #[test]
    fn merge_promotes_scalar_to_array() {
        let out = merge_into(json!({"a": 1}), &json!(2), "a").unwrap();
        assert_eq!(out, json!({"a": [1, 2]}));
    }

    #[test]
    fn merge_appends_to_existing_array() {
        let out = merge_into(json!({"a": [1, 2]}), &json!(3), "a").unwrap();
        assert_eq!(out, json!({"a": [1, 2, 3]}));
    }

    #[test]
    fn merge_identical_scalar_does_not_promote() {
        let once = merge_into(json!({}), &json!("v"), "a.b").unwrap();
        let twice = merge_into(once.clone(), &json!("v"), "a.b").unwrap();
        assert_eq!(once, twice);
        assert_eq!(twice, json!({"a": {"b": "v"}}));
    }

    #[test]
    fn merge_mid_path_scalar_promotes_with_shell() {
        let out = merge_into(json!({"a": 1}), &json!("v"), "a.b").unwrap();
        assert_eq!(out, json!({"a": [1, {"b": "v"}]}));
    }

    #[test]
    fn merge_mid_path_array_appends_shell() {
        let out = merge_into(json!({"a": [1]}), &json!("v"), "a.b").unwrap();
        assert_eq!(out, json!({"a": [1, {"b": "v"}]}));
    }

    #[test]
    fn merge_object_value_unions_shallowly() {
        let root = json!({"a": {"x": 1, "keep": true}});
        let out = merge_into(root, &json!({"x": {"deep": 2}, "y": 3}), "a").unwrap();
        // x is overwritten wholesale, not merged recursively
        assert_eq!(out, json!({"a": {"x": {"deep": 2}, "keep": true, "y": 3}}));
    }

    #[test]
    fn merge_object_value_at_root_path() {
        let out = merge_into(json!({"a": 1}), &json!({"b": 2}), "").unwrap();
        assert_eq!(out, json!({"a": 1, "b": 2}));
    }

    #[test]
    fn merge_object_value_deep_path_creates_shells() {
        let out = merge_into(json!({}), &json!({"x": 1}), "a.b").unwrap();
        assert_eq!(out, json!({"a": {"b": {"x": 1}}}));
    }

    #[test]
    fn merge_null_value_is_a_no_op() {
        let root = json!({"a": 1});
        assert_eq!(merge_into(root.clone(), &json!(null), "a").unwrap(), root);
    }

    #[test]
    fn merge_into_null_root_is_a_no_op() {
        assert_eq!(merge_into(json!(null), &json!(1), "a").unwrap(), json!(null));
    }

    #[test]
    fn merge_through_scalar_root_fails_with_segment() {
        let err = merge_into(json!(42), &json!(1), "a.b").unwrap_err();
        assert_eq!(err, MergeError::NotAnObject { segment: "a".to_string() });
    }

    #[test]
    fn merge_object_into_scalar_root_fails() {
        assert!(merge_into(json!("s"), &json!({"a": 1}), "").is_err());
    }

    #[test]
    fn merge_key_replacement_preserves_position() {
        let root = serde_json::from_str::<Value>(r#"{"a": 1, "b": 2, "c": 3}"#).unwrap();
        let out = merge_into(root, &json!({"b": 99}), "").unwrap();
        let keys: Vec<&str> = out.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["a", "b", "c"]);
        assert_eq!(out["b"], json!(99));
    }
}
