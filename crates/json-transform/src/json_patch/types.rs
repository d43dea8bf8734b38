//! Operation and error types for the patch applier.

use serde_json::Value;
use thiserror::Error;

pub use json_transform_json_pointer::Path;

/// Failure of a single operation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OpError {
    /// The addressed location (or `from` location) does not exist.
    #[error("TARGET_MISSING")]
    TargetMissing,
    /// Array index outside the permitted range.
    #[error("INDEX_OUT_OF_BOUNDS")]
    IndexOutOfBounds,
    /// Traversal through, or mutation of, a non-container.
    #[error("TYPE_MISMATCH")]
    TypeMismatch,
    /// A `test` operation found an unequal value.
    #[error("TEST_FAILED")]
    TestFailed,
    /// A `move` whose `from` is a proper prefix of its `path`.
    #[error("ILLEGAL_MOVE")]
    IllegalMove,
    /// Unrecognized operation name.
    #[error("UNKNOWN_OP: {0}")]
    UnknownOp(String),
    /// A pointer string that does not follow RFC 6901.
    #[error("INVALID_POINTER: {0}")]
    InvalidPointer(String),
    /// A required operation field is absent or has the wrong shape.
    #[error("MISSING_FIELD: {0}")]
    MissingField(&'static str),
    /// The patch document or an operation is not the right JSON shape.
    #[error("MALFORMED: {0}")]
    Malformed(&'static str),
}

/// Failure of a patch, pointing at the operation that caused it.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("operation {op_index} failed: {source}")]
pub struct PatchError {
    pub op_index: usize,
    #[source]
    pub source: OpError,
}

impl PatchError {
    pub fn at(op_index: usize, source: OpError) -> Self {
        Self { op_index, source }
    }
}

/// An RFC 6902 operation with decoded pointer paths.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Add { path: Path, value: Value },
    Remove { path: Path },
    Replace { path: Path, value: Value },
    Move { path: Path, from: Path },
    Copy { path: Path, from: Path },
    Test { path: Path, value: Value },
}

impl Op {
    /// The RFC 6902 operation name.
    pub fn op_name(&self) -> &'static str {
        match self {
            Op::Add { .. } => "add",
            Op::Remove { .. } => "remove",
            Op::Replace { .. } => "replace",
            Op::Move { .. } => "move",
            Op::Copy { .. } => "copy",
            Op::Test { .. } => "test",
        }
    }

    /// The target path of the operation.
    pub fn path(&self) -> &Path {
        match self {
            Op::Add { path, .. }
            | Op::Remove { path }
            | Op::Replace { path, .. }
            | Op::Move { path, .. }
            | Op::Copy { path, .. }
            | Op::Test { path, .. } => path,
        }
    }
}
