//! Classic `$`-rooted JSONPath for the parameter resolver.
//!
//! Supports member names (dot or bracket notation), array indexes
//! (negative counts from the end), wildcards, slices, unions, recursive
//! descent, and filter expressions with existence tests, comparisons and
//! boolean connectives. Number comparisons inside filters are exact
//! decimal comparisons via the document adapter.
//!
//! # Example
//!
//! ```
//! use json_transform_json_path::{eval, JsonPath};
//! use serde_json::json;
//!
//! let doc = json!({"store": {"books": [
//!     {"title": "Sayings of the Century", "price": 8.95},
//!     {"title": "Sword of Honour", "price": 12.99}
//! ]}});
//!
//! let path = JsonPath::parse("$.store.books[*].title").unwrap();
//! assert_eq!(eval(&path, &doc).len(), 2);
//!
//! let cheap = JsonPath::parse("$.store.books[?(@.price < 10)].title").unwrap();
//! assert_eq!(eval(&cheap, &doc), vec![&json!("Sayings of the Century")]);
//! ```

mod context;
mod eval;
mod parser;
mod types;

pub use context::DocumentContext;
pub use eval::eval;
pub use parser::JsonPathError;
pub use types::{CmpOp, FilterExpr, JsonPath, Operand, Segment, Selector};
