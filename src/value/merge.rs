use super::subset::value_is_empty;
use serde_json::Value;

/// Union `expected` into `existing` without disturbing user content.
///
/// Existing scalar values win on conflict. Missing mapping keys are appended
/// at the end of their containing mapping, in the order they appear in
/// `expected`. Nested mappings merge recursively by the same rule. List
/// entries absent from the existing list are appended; entries the user
/// duplicated are never removed or deduplicated. On a type mismatch the
/// existing value is kept. An empty existing value is replaced wholesale.
pub fn merge_values(existing: Value, expected: &Value) -> Value {
    if value_is_empty(&existing) {
        return expected.clone();
    }

    match (existing, expected) {
        (Value::Object(mut current), Value::Object(wanted)) => {
            for (key, value) in wanted {
                match current.get_mut(key) {
                    Some(slot) => {
                        let present = std::mem::take(slot);
                        *slot = merge_values(present, value);
                    }
                    None => {
                        current.insert(key.clone(), value.clone());
                    }
                }
            }
            Value::Object(current)
        }
        (Value::Array(mut current), Value::Array(wanted)) => {
            for item in wanted {
                if !current.contains(item) {
                    current.push(item.clone());
                }
            }
            Value::Array(current)
        }
        (current, _) => current,
    }
}
