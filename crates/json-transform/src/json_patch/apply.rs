//! Patch application.
//!
//! Every operation mutates the working document in place; [`apply_patch`]
//! wraps the sequence in clone-and-publish semantics so failures have no
//! observable effect.

use serde_json::Value;

use json_transform_document::deep_equal;
use json_transform_json_pointer::{is_child, is_valid_index};

use super::types::{Op, OpError, PatchError};

// ── Pointer navigation ────────────────────────────────────────────────────

/// Resolve an array token against `len`. `-` means one past the end and is
/// only accepted when `allow_end`; a numeric token must satisfy
/// `0 <= i <= max`.
fn array_index(token: &str, len: usize, allow_end: bool, max: usize) -> Result<usize, OpError> {
    if token == "-" {
        if allow_end {
            return Ok(len);
        }
        return Err(OpError::IndexOutOfBounds);
    }
    if !is_valid_index(token) {
        return Err(OpError::InvalidPointer(token.to_string()));
    }
    let idx: usize = token.parse().map_err(|_| OpError::IndexOutOfBounds)?;
    if idx > max {
        return Err(OpError::IndexOutOfBounds);
    }
    Ok(idx)
}

/// Immutable walk to the value at `path`.
fn get_at<'a>(doc: &'a Value, path: &[String]) -> Option<&'a Value> {
    let mut current = doc;
    for token in path {
        current = match current {
            Value::Object(map) => map.get(token)?,
            Value::Array(arr) => {
                if !is_valid_index(token) {
                    return None;
                }
                arr.get(token.parse::<usize>().ok()?)?
            }
            _ => return None,
        };
    }
    Some(current)
}

/// Mutable walk to the value at `path`; every step must exist.
fn get_mut_at<'a>(doc: &'a mut Value, path: &[String]) -> Result<&'a mut Value, OpError> {
    let mut current = doc;
    for token in path {
        current = match current {
            Value::Object(map) => map.get_mut(token).ok_or(OpError::TargetMissing)?,
            Value::Array(arr) => {
                if !is_valid_index(token) {
                    return Err(OpError::InvalidPointer(token.clone()));
                }
                let idx: usize = token.parse().map_err(|_| OpError::IndexOutOfBounds)?;
                arr.get_mut(idx).ok_or(OpError::TargetMissing)?
            }
            _ => return Err(OpError::TypeMismatch),
        };
    }
    Ok(current)
}

// ── Individual operation applicators ──────────────────────────────────────

fn apply_add(doc: &mut Value, path: &[String], value: Value) -> Result<(), OpError> {
    let Some((key, parent_path)) = path.split_last() else {
        // adding at the root replaces the whole document
        *doc = value;
        return Ok(());
    };
    let parent = get_mut_at(doc, parent_path)?;
    match parent {
        Value::Object(map) => {
            // insert-or-replace; an existing key keeps its position
            map.insert(key.clone(), value);
            Ok(())
        }
        Value::Array(arr) => {
            let idx = array_index(key, arr.len(), true, arr.len())?;
            arr.insert(idx, value);
            Ok(())
        }
        _ => Err(OpError::TypeMismatch),
    }
}

fn apply_remove(doc: &mut Value, path: &[String]) -> Result<Value, OpError> {
    let Some((key, parent_path)) = path.split_last() else {
        // the document root cannot be detached
        return Err(OpError::TypeMismatch);
    };
    let parent = get_mut_at(doc, parent_path)?;
    match parent {
        Value::Object(map) => {
            // shift semantics keep the remaining keys in order
            map.shift_remove(key).ok_or(OpError::TargetMissing)
        }
        Value::Array(arr) => {
            let idx = array_index(key, arr.len(), false, arr.len().saturating_sub(1))?;
            if arr.is_empty() {
                return Err(OpError::IndexOutOfBounds);
            }
            Ok(arr.remove(idx))
        }
        _ => Err(OpError::TypeMismatch),
    }
}

fn apply_replace(doc: &mut Value, path: &[String], value: Value) -> Result<(), OpError> {
    // the target must already exist
    let target = get_mut_at(doc, path)?;
    *target = value;
    Ok(())
}

fn apply_move(doc: &mut Value, path: &[String], from: &[String]) -> Result<(), OpError> {
    if is_child(from, path) {
        return Err(OpError::IllegalMove);
    }
    let value = apply_remove(doc, from)?;
    apply_add(doc, path, value)
}

fn apply_copy(doc: &mut Value, path: &[String], from: &[String]) -> Result<(), OpError> {
    let value = get_at(doc, from).ok_or(OpError::TargetMissing)?.clone();
    apply_add(doc, path, value)
}

fn apply_test(doc: &Value, path: &[String], value: &Value) -> Result<(), OpError> {
    let actual = get_at(doc, path).ok_or(OpError::TargetMissing)?;
    if deep_equal(actual, value) {
        Ok(())
    } else {
        Err(OpError::TestFailed)
    }
}

// ── Entry points ──────────────────────────────────────────────────────────

/// Apply a single operation to the document in place.
pub fn apply_op(doc: &mut Value, op: &Op) -> Result<(), OpError> {
    match op {
        Op::Add { path, value } => apply_add(doc, path, value.clone()),
        Op::Remove { path } => apply_remove(doc, path).map(|_| ()),
        Op::Replace { path, value } => apply_replace(doc, path, value.clone()),
        Op::Move { path, from } => apply_move(doc, path, from),
        Op::Copy { path, from } => apply_copy(doc, path, from),
        Op::Test { path, value } => apply_test(doc, path, value),
    }
}

/// Apply a sequence of operations atomically.
///
/// Works on a clone and publishes only on success: when any operation
/// fails, the error names its index and the input document is untouched.
pub fn apply_patch(doc: &Value, ops: &[Op]) -> Result<Value, PatchError> {
    let mut working = doc.clone();
    for (op_index, op) in ops.iter().enumerate() {
        apply_op(&mut working, op).map_err(|source| PatchError::at(op_index, source))?;
    }
    Ok(working)
}

/// Decode a JSON patch document and apply it to `doc`.
pub fn patch(patch_doc: &Value, doc: &Value) -> Result<Value, PatchError> {
    let ops = super::codec::patch_from_json(patch_doc)?;
    apply_patch(doc, &ops)
}

// ── Tests ─────────────────────────────────────────────────────────────────
