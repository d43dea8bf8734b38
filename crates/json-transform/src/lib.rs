//! json-transform — JSON transformation toolkit.
//!
//! Three coupled subsystems over the document model of
//! [`json_transform_document`]:
//!
//! - [`merge`] — a path-addressed deep merge that creates missing
//!   intermediate objects and promotes scalars to arrays on collision.
//! - [`resolver`] — expansion of embedded references: `$`-rooted JSONPath
//!   into the primary document, `#name` reads from named secondary
//!   documents, the `#uuid` / `#null` / `#now` intrinsics, and `\$` / `\#`
//!   literal escapes.
//! - [`json_patch`] — an atomic RFC 6902 patch applier (`add`, `remove`,
//!   `replace`, `move`, `copy`, `test`).

pub mod functions;
pub mod json_patch;
pub mod merge;
pub mod resolver;

pub use json_patch::{apply_patch, patch, Op, OpError, PatchError};
pub use merge::{extract_path, merge_into, MergeError};
pub use resolver::{Resolver, ResolverError};
