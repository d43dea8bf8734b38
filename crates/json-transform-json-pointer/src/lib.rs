//! JSON Pointer (RFC 6901) utilities.
//!
//! A pointer is a `/`-separated string whose components escape `~` as `~0`
//! and `/` as `~1`; the empty string addresses the document root. This
//! crate only deals in the textual form and its token list — traversal
//! lives with the callers (the patch applier walks tokens itself).

use thiserror::Error;

mod util;

pub use util::{
    escape_component, format_json_pointer, is_child, is_valid_index, parent, parse_json_pointer,
    unescape_component,
};

/// A single decoded pointer token.
pub type PathStep = String;

/// A decoded pointer: the ordered token list, root being the empty list.
pub type Path = Vec<PathStep>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JsonPointerError {
    #[error("POINTER_INVALID: {0}")]
    PointerInvalid(String),
    #[error("NO_PARENT")]
    NoParent,
}
