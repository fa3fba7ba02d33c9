use super::FormatError;
use serde_json::Value;

/// Parse line-oriented text into an ordered list of literal lines.
///
/// Blank lines and comment lines are carried through as opaque entries; the
/// codec never interprets them.
pub fn parse(content: &str) -> Value {
    Value::Array(
        content
            .lines()
            .map(|line| Value::String(line.to_string()))
            .collect(),
    )
}

/// Render an ordered list of lines, one literal line per entry.
pub fn render(value: &Value) -> Result<String, FormatError> {
    let Value::Array(items) = value else {
        return Err(FormatError::Unsupported {
            format: "lines",
            reason: "value must be a list of lines".to_string(),
        });
    };

    let mut out = String::new();
    for item in items {
        let Value::String(line) = item else {
            return Err(FormatError::Unsupported {
                format: "lines",
                reason: format!("list entry {item} is not a string"),
            });
        };
        out.push_str(line);
        out.push('\n');
    }
    Ok(out)
}
