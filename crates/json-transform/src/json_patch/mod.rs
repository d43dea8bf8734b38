//! JSON Patch (RFC 6902).
//!
//! The six standard operations — `add`, `remove`, `replace`, `move`,
//! `copy`, `test` — applied atomically: [`apply_patch`] works on a clone
//! of the input document and publishes only when every operation
//! succeeded, so a failing patch leaves the caller's document untouched.
//!
//! Paths are JSON Pointers (RFC 6901); `-` addresses one past the end of
//! an array and is valid only for `add`.

pub mod apply;
pub mod codec;
pub mod types;

pub use apply::{apply_op, apply_patch, patch};
pub use codec::{op_from_json, op_to_json, patch_from_json, patch_to_json};
pub use types::{Op, OpError, PatchError};
