//! JSON encoding of patch operations (the RFC 6902 wire form).

use serde_json::{json, Value};

use json_transform_json_pointer::{format_json_pointer, parse_json_pointer, Path};

use super::types::{Op, OpError, PatchError};

fn decode_pointer(v: &Value) -> Result<Path, OpError> {
    let s = v.as_str().ok_or(OpError::Malformed("pointer must be a string"))?;
    parse_json_pointer(s).map_err(|_| OpError::InvalidPointer(s.to_string()))
}

fn encode_pointer(path: &[String]) -> Value {
    Value::String(format_json_pointer(path))
}

/// Decode one operation object.
pub fn op_from_json(v: &Value) -> Result<Op, OpError> {
    let obj = v
        .as_object()
        .ok_or(OpError::Malformed("operation must be an object"))?;
    let op_name = obj
        .get("op")
        .and_then(Value::as_str)
        .ok_or(OpError::MissingField("op"))?;
    let path = decode_pointer(obj.get("path").ok_or(OpError::MissingField("path"))?)?;
    let value = |field: &'static str| -> Result<Value, OpError> {
        obj.get(field).cloned().ok_or(OpError::MissingField(field))
    };
    let from = || -> Result<Path, OpError> {
        decode_pointer(obj.get("from").ok_or(OpError::MissingField("from"))?)
    };

    match op_name {
        "add" => Ok(Op::Add { path, value: value("value")? }),
        "remove" => Ok(Op::Remove { path }),
        "replace" => Ok(Op::Replace { path, value: value("value")? }),
        "move" => Ok(Op::Move { path, from: from()? }),
        "copy" => Ok(Op::Copy { path, from: from()? }),
        "test" => Ok(Op::Test { path, value: value("value")? }),
        other => Err(OpError::UnknownOp(other.to_string())),
    }
}

/// Encode one operation back to its wire form.
pub fn op_to_json(op: &Op) -> Value {
    match op {
        Op::Add { path, value } => json!({
            "op": "add",
            "path": encode_pointer(path),
            "value": value,
        }),
        Op::Remove { path } => json!({
            "op": "remove",
            "path": encode_pointer(path),
        }),
        Op::Replace { path, value } => json!({
            "op": "replace",
            "path": encode_pointer(path),
            "value": value,
        }),
        Op::Move { path, from } => json!({
            "op": "move",
            "path": encode_pointer(path),
            "from": encode_pointer(from),
        }),
        Op::Copy { path, from } => json!({
            "op": "copy",
            "path": encode_pointer(path),
            "from": encode_pointer(from),
        }),
        Op::Test { path, value } => json!({
            "op": "test",
            "path": encode_pointer(path),
            "value": value,
        }),
    }
}

/// Decode a patch document (a JSON array of operations). Errors carry the
/// index of the offending operation.
pub fn patch_from_json(v: &Value) -> Result<Vec<Op>, PatchError> {
    let arr = v
        .as_array()
        .ok_or(PatchError::at(0, OpError::Malformed("patch must be an array")))?;
    arr.iter()
        .enumerate()
        .map(|(i, op)| op_from_json(op).map_err(|source| PatchError::at(i, source)))
        .collect()
}

/// Encode a list of operations as a patch document.
pub fn patch_to_json(ops: &[Op]) -> Value {
    Value::Array(ops.iter().map(op_to_json).collect())
}
