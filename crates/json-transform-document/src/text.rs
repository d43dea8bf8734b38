use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("PARSE: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parse JSON text into a value.
///
/// The single text-to-node entry point. Number literals keep their source
/// text, so `parse` followed by [`to_json_text`] round-trips `1.50` as-is.
pub fn parse(text: &str) -> Result<Value, DocumentError> {
    Ok(serde_json::from_str(text)?)
}

/// Canonical (compact) JSON text for a value.
pub fn to_json_text(value: &Value) -> String {
    value.to_string()
}
