//! Parameter resolution for embedded references.
//!
//! A reference string resolves to a literal (with `\$` / `\#` escaping), an
//! intrinsic macro (`#uuid`, `#null`, `#now`), or a JSONPath read from the
//! primary document (`$...`) or a named secondary document (`#name...`).
//! Anything unrecognized echoes back unchanged, so templates degrade
//! gracefully instead of erroring on plain text.

use std::cell::RefCell;
use std::collections::HashMap;

use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use json_transform_document::unwrap_value;
use json_transform_json_path::{DocumentContext, JsonPathError};

#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("invalid reference {name:?}: {source}")]
    BadReference {
        name: String,
        source: JsonPathError,
    },
}

/// A registered secondary document.
///
/// Scalars are stored directly; structured documents start lazy and are
/// wrapped into a [`DocumentContext`] on first reference, then memoized.
#[derive(Debug)]
enum Secondary {
    Literal(Value),
    Lazy(Value),
    Context(DocumentContext),
}

/// Resolves reference strings against a primary document and any number of
/// named secondary documents.
///
/// Secondary materialization is memoized per resolver instance; a resolver
/// is single-threaded by design and not meant to be shared across workers.
/// Resolution never mutates the primary or any secondary document.
pub struct Resolver {
    primary: DocumentContext,
    secondary: RefCell<HashMap<String, Secondary>>,
    reduce_big_decimals: bool,
}

impl Resolver {
    /// Wrap a payload as the primary document.
    pub fn new(payload: Value) -> Self {
        Self {
            primary: DocumentContext::new(payload),
            secondary: RefCell::new(HashMap::new()),
            reduce_big_decimals: false,
        }
    }

    /// Register a secondary document under `key` (which must begin with
    /// `$` or `#` to be reachable). Scalar values resolve directly; null
    /// and structured values are wrapped into a lazy document context,
    /// materialized on first reference.
    pub fn with_secondary(self, key: impl Into<String>, value: Value) -> Self {
        let entry = match value {
            Value::String(_) | Value::Number(_) | Value::Bool(_) => Secondary::Literal(value),
            other => Secondary::Lazy(other),
        };
        self.secondary.borrow_mut().insert(key.into(), entry);
        self
    }

    /// Reduce high-precision numbers to native numerics on the way out.
    pub fn unwrapping(mut self, reduce_big_decimals: bool) -> Self {
        self.reduce_big_decimals = reduce_big_decimals;
        self
    }

    /// Resolve one reference.
    pub fn resolve(&self, name: &str) -> Result<Value, ResolverError> {
        if name.trim().is_empty() {
            return Ok(Value::String(name.to_string()));
        }
        if !name.starts_with('$') && !name.starts_with('#') {
            // literal, possibly escaped
            let literal = name
                .strip_prefix("\\$")
                .map(|rest| format!("${rest}"))
                .or_else(|| name.strip_prefix("\\#").map(|rest| format!("#{rest}")))
                .unwrap_or_else(|| name.to_string());
            return Ok(Value::String(literal));
        }
        if name.starts_with('#') && name.len() <= 5 {
            match name.to_lowercase().as_str() {
                "#uuid" => return Ok(Value::String(Uuid::new_v4().to_string())),
                "#null" => return Ok(Value::Null),
                "#now" => {
                    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
                    return Ok(Value::String(now));
                }
                _ => {}
            }
        }
        // regex backreferences ($0, $$...) are not references
        if let Some(second) = name.chars().nth(1) {
            if second == '$' || second.is_ascii_digit() {
                return Ok(Value::String(name.to_string()));
            }
        }

        let root_key = root_of(name);
        let mut secondary = self.secondary.borrow_mut();
        let res = match secondary.get_mut(root_key) {
            Some(entry) => {
                if let Secondary::Lazy(doc) = entry {
                    *entry = Secondary::Context(DocumentContext::new(doc.take()));
                }
                match entry {
                    Secondary::Literal(v) => v.clone(),
                    Secondary::Context(ctx) => {
                        let expr = format!("${}", &name[root_key.len()..]);
                        ctx.read(&expr).map_err(|source| ResolverError::BadReference {
                            name: name.to_string(),
                            source,
                        })?
                    }
                    Secondary::Lazy(_) => unreachable!("lazy entry was just materialized"),
                }
            }
            // unrecognized root
            None if root_key != "$" => return Ok(Value::String(name.to_string())),
            None => self
                .primary
                .read(name)
                .map_err(|source| ResolverError::BadReference {
                    name: name.to_string(),
                    source,
                })?,
        };
        drop(secondary);

        if self.reduce_big_decimals {
            return Ok(unwrap_value(&res, true));
        }
        Ok(res)
    }
}

/// The reference's root key: the prefix up to the first `.` or `[`.
fn root_of(name: &str) -> &str {
    let end = name
        .find('.')
        .into_iter()
        .chain(name.find('['))
        .min()
        .unwrap_or(name.len());
    &name[..end]
}
