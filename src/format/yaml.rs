use super::FormatError;
use serde_json::Value;

/// Parse YAML text into a structured value. An empty document parses to null.
pub fn parse(content: &str) -> Result<Value, FormatError> {
    if content.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_yaml::from_str(content)?)
}

/// Render a value as YAML, keeping mapping key order.
pub fn render(value: &Value) -> Result<String, FormatError> {
    Ok(serde_yaml::to_string(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_document_is_null() {
        assert_eq!(parse("").unwrap(), Value::Null);
        assert_eq!(parse("  \n").unwrap(), Value::Null);
    }

    #[test]
    fn test_round_trip_keeps_key_order() {
        let value = json!({"name": "ci", "on": ["push"], "jobs": {"test": {"runs-on": "ubuntu-latest"}}});
        let rendered = render(&value).unwrap();
        assert_eq!(parse(&rendered).unwrap(), value);

        let name = rendered.find("name:").unwrap();
        let jobs = rendered.find("jobs:").unwrap();
        assert!(name < jobs);
    }

    #[test]
    fn test_parse_rejects_invalid_yaml() {
        assert!(matches!(parse("a: [1,"), Err(FormatError::YamlError(_))));
    }
}
