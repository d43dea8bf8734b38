use serde_json::Value;

use crate::eval::eval;
use crate::parser::JsonPathError;
use crate::types::JsonPath;

/// A document wrapped for repeated JSONPath reads.
///
/// The parameter resolver materializes one of these per document (the
/// primary eagerly, secondaries lazily) and calls [`DocumentContext::read`]
/// per reference. Reads never mutate the wrapped document.
#[derive(Debug, Clone)]
pub struct DocumentContext {
    root: Value,
}

impl DocumentContext {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Read the value addressed by `expr`.
    ///
    /// A definite path yields its single match cloned, or JSON null when
    /// the location does not exist. An indefinite path (wildcard, slice,
    /// union, filter, recursive descent) yields the array of all matches.
    pub fn read(&self, expr: &str) -> Result<Value, JsonPathError> {
        let path = JsonPath::parse(expr)?;
        let matches = eval(&path, &self.root);
        if path.is_definite() {
            Ok(matches.first().map(|v| (*v).clone()).unwrap_or(Value::Null))
        } else {
            Ok(Value::Array(matches.into_iter().cloned().collect()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn definite_read_returns_single_value() {
        let ctx = DocumentContext::new(json!({"user": {"name": "Ada"}}));
        assert_eq!(ctx.read("$.user.name").unwrap(), json!("Ada"));
    }

    #[test]
    fn definite_read_of_missing_location_is_null() {
        let ctx = DocumentContext::new(json!({"user": {}}));
        assert_eq!(ctx.read("$.user.name").unwrap(), Value::Null);
    }

    #[test]
    fn indefinite_read_returns_match_array() {
        let ctx = DocumentContext::new(json!({"a": {"x": 1}, "b": {"x": 2}}));
        assert_eq!(ctx.read("$.*.x").unwrap(), json!([1, 2]));
        assert_eq!(ctx.read("$..x").unwrap(), json!([1, 2]));
    }

    #[test]
    fn read_root() {
        let doc = json!([1, 2]);
        let ctx = DocumentContext::new(doc.clone());
        assert_eq!(ctx.read("$").unwrap(), doc);
    }

    #[test]
    fn malformed_expression_errors() {
        let ctx = DocumentContext::new(json!({}));
        assert!(ctx.read("$[").is_err());
        assert!(ctx.read("nope").is_err());
    }
}
