use super::FormatError;
use serde_json::Value;

pub fn parse(content: String) -> Value {
    Value::String(content)
}

/// Byte-for-byte passthrough; only strings can be written.
pub fn render(value: &Value) -> Result<String, FormatError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(FormatError::Unsupported {
            format: "text",
            reason: format!("value {other} is not a string"),
        }),
    }
}
