use crate::{JsonPointerError, Path};

/// Unescape a pointer component (`~1` to `/`, then `~0` to `~`).
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    component.replace("~1", "/").replace("~0", "~")
}

/// Escape a pointer component (`~` to `~0`, `/` to `~1`).
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Decode a pointer string into its token list.
///
/// The empty string addresses the root (empty list); any other pointer
/// must begin with `/`.
pub fn parse_json_pointer(pointer: &str) -> Result<Path, JsonPointerError> {
    if pointer.is_empty() {
        return Ok(Vec::new());
    }
    let rest = pointer
        .strip_prefix('/')
        .ok_or_else(|| JsonPointerError::PointerInvalid(pointer.to_string()))?;
    Ok(rest.split('/').map(unescape_component).collect())
}

/// Encode a token list back into a pointer string. Inverse of
/// [`parse_json_pointer`].
pub fn format_json_pointer(path: &[String]) -> String {
    let mut out = String::new();
    for component in path {
        out.push('/');
        out.push_str(&escape_component(component));
    }
    out
}

/// True when the token is a valid array index: ASCII digits only, no
/// leading zero (except `0` itself).
pub fn is_valid_index(token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    let bytes = token.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(u8::is_ascii_digit)
}

/// True when `parent` is a proper prefix of `child`.
pub fn is_child(parent: &[String], child: &[String]) -> bool {
    parent.len() < child.len() && parent.iter().zip(child).all(|(a, b)| a == b)
}

/// The parent of a path; the root has none.
pub fn parent(path: &[String]) -> Result<Path, JsonPointerError> {
    match path.split_last() {
        Some((_, init)) => Ok(init.to_vec()),
        None => Err(JsonPointerError::NoParent),
    }
}
