//! Bridge from serialize-format bytes to JSON text.
//!
//! Thin layer over `decode`: the value tree is re-serialized with
//! `serde_json` using the conventional mapping (Map → object, List →
//! array, scalars direct, Null → null). Map keys come out in sorted
//! order because `Value::Map` is a `BTreeMap`.

use thiserror::Error;

use crate::decode::{DecodeError, decode};

#[derive(Debug, Error)]
pub enum JsonError {
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decodes `input` and renders the result as compact JSON.
///
/// # Examples
/// ```
/// use unphp_core::to_json;
///
/// let json = to_json(b"a:1:{s:5:\"apple\";i:1;}")?;
/// assert_eq!(json, r#"{"apple":1}"#);
/// # Ok::<(), unphp_core::JsonError>(())
/// ```
pub fn to_json(input: &[u8]) -> Result<String, JsonError> {
    let value = decode(input)?;
    Ok(serde_json::to_string(&value)?)
}

/// Same as [`to_json`] but pretty-printed.
pub fn to_json_pretty(input: &[u8]) -> Result<String, JsonError> {
    let value = decode(input)?;
    Ok(serde_json::to_string_pretty(&value)?)
}
