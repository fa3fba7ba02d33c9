use serde_json::Value;

/// Check whether a value carries no required content.
///
/// Null, empty strings, empty lists and empty mappings all count as empty.
/// A unit with an empty expected config is correct as soon as its file exists.
pub fn value_is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Check whether `expected` is structurally contained in `actual`.
///
/// Mappings are compared key by key, recursively. Lists are compared by
/// element membership, ignoring order and position. Scalars must be equal.
/// Extra content in `actual` is always permitted.
pub fn is_subset(expected: &Value, actual: &Value) -> bool {
    if value_is_empty(expected) {
        return true;
    }

    match (expected, actual) {
        (Value::Object(exp), Value::Object(act)) => exp
            .iter()
            .all(|(key, value)| act.get(key).is_some_and(|found| is_subset(value, found))),
        (Value::Array(exp), Value::Array(act)) => exp.iter().all(|item| act.contains(item)),
        (exp, act) => exp == act,
    }
}
