//! Params field parsing.

use serde_json::{Map, Value};

use crate::errors::{FormError, FormResult};

/// Parse the params text typed into the form.
///
/// Blank text means "no params" and yields an empty object. Anything else must
/// be a JSON object; the parser's own message is kept verbatim on failure.
pub fn parse_params(text: &str) -> FormResult<Map<String, Value>> {
    if text.trim().is_empty() {
        return Ok(Map::new());
    }

    let value: Value =
        serde_json::from_str(text).map_err(|e| FormError::invalid_params(e.to_string()))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(FormError::invalid_params(format!(
            "expected a JSON object, found {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
