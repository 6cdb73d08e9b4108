//! Input shape checks for JSON request bodies.
//!
//! Bodies are taken as raw bytes so a missing, empty, or malformed body
//! surfaces as the error code of the field it lacks rather than as a
//! framework-level rejection.

use serde_json::{Map, Value};

/// Parse `bytes` as a JSON object. Anything else reads as an empty object.
pub(crate) fn object(bytes: &[u8]) -> Map<String, Value> {
  match serde_json::from_slice(bytes) {
    Ok(Value::Object(map)) => map,
    _ => Map::new(),
  }
}

/// The string value of `key`, if present and a string.
pub(crate) fn str_field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
  fields.get(key).and_then(Value::as_str)
}
