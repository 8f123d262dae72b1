//! JSON re-serialization.

use crate::Result;
use serde_json::Value;

/// Parse a JSON document and re-emit it compactly.
///
/// Object keys keep their input order, and numbers are re-emitted with the
/// digits they were written with, so integers wider than 64 bits survive.
///
/// ```rust
/// use flattext::extraction::json::normalize_json;
///
/// let text = normalize_json(br#"{ "b": [2, 3], "a": 1 }"#).unwrap();
/// assert_eq!(text, r#"{"b":[2,3],"a":1}"#);
/// ```
pub fn normalize_json(json_bytes: &[u8]) -> Result<String> {
    let value: Value = serde_json::from_slice(json_bytes)?;
    Ok(serde_json::to_string(&value)?)
}
