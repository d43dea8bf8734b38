use serde_json::Value;

use crate::parser::{JsonPathError, Parser};

/// One selector inside a path segment.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// Member access: `.name`, `['key']`
    Name(String),
    /// Array element access: `[0]`, `[-1]`
    Index(isize),
    /// Array slice: `[start:end:step]`
    Slice {
        start: Option<isize>,
        end: Option<isize>,
        step: Option<isize>,
    },
    /// All members or elements: `.*`, `[*]`
    Wildcard,
    /// Conditional selection: `[?(@.price < 10)]`
    Filter(FilterExpr),
}

/// A path segment: one or more selectors, optionally applied by recursive
/// descent (`..`).
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub selectors: Vec<Selector>,
    pub recursive: bool,
}

/// A parsed JSONPath expression.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonPath {
    pub segments: Vec<Segment>,
}

impl JsonPath {
    /// Parse a `$`-rooted JSONPath expression.
    pub fn parse(input: &str) -> Result<Self, JsonPathError> {
        Parser::parse(input)
    }

    /// A definite path addresses at most one location: every segment is a
    /// single member name or index and nothing descends recursively.
    /// Indefinite paths (wildcards, slices, unions, filters, `..`) read as
    /// an array of matches.
    pub fn is_definite(&self) -> bool {
        self.segments.iter().all(|seg| {
            !seg.recursive
                && seg.selectors.len() == 1
                && matches!(seg.selectors[0], Selector::Name(_) | Selector::Index(_))
        })
    }
}

/// A filter expression inside `[?(...)]`.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    /// Existence of a path from the current item (or the root).
    Exists(Operand),
    /// Comparison between two operands.
    Compare {
        op: CmpOp,
        left: Operand,
        right: Operand,
    },
    And(Box<FilterExpr>, Box<FilterExpr>),
    Or(Box<FilterExpr>, Box<FilterExpr>),
    Not(Box<FilterExpr>),
}

/// A comparison operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Path rooted at the current item: `@.name`
    Current(JsonPath),
    /// Path rooted at the document: `$.limit`
    Root(JsonPath),
    /// Literal string, number, boolean or null.
    Literal(Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}
