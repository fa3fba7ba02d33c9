use super::FormatError;
use serde_json::Value;

pub fn parse(content: &str) -> Result<Value, FormatError> {
    Ok(serde_json::from_str(content)?)
}

pub fn render(value: &Value) -> Result<String, FormatError> {
    Ok(serde_json::to_string_pretty(value)?)
}
