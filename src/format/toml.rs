use super::FormatError;
use serde_json::{Map, Value};
use toml_edit::{Array, DocumentMut, InlineTable, Item, Table, Value as TomlValue};

/// Parse TOML text into a structured value, preserving declared key order.
pub fn parse(content: &str) -> Result<Value, FormatError> {
    let doc: DocumentMut = content.parse()?;
    Ok(table_to_value(doc.as_table()))
}

/// Render a mapping as TOML.
///
/// Arrays of scalars come out one item per line so version-control diffs stay
/// small; arrays whose items are all mappings come out as single-line inline
/// tables. Key order follows the mapping's own order.
pub fn render(value: &Value) -> Result<String, FormatError> {
    let Value::Object(map) = value else {
        return Err(FormatError::Unsupported {
            format: "toml",
            reason: "top-level value must be a mapping".to_string(),
        });
    };

    let mut doc = DocumentMut::new();
    fill_table(doc.as_table_mut(), map)?;
    Ok(doc.to_string())
}

fn table_to_value(table: &Table) -> Value {
    let mut map = Map::new();
    for (key, item) in table.iter() {
        if let Some(value) = item_to_value(item) {
            map.insert(key.to_string(), value);
        }
    }
    Value::Object(map)
}

fn item_to_value(item: &Item) -> Option<Value> {
    match item {
        Item::None => None,
        Item::Value(value) => Some(toml_value_to_value(value)),
        Item::Table(table) => Some(table_to_value(table)),
        Item::ArrayOfTables(tables) => {
            Some(Value::Array(tables.iter().map(table_to_value).collect()))
        }
    }
}

fn toml_value_to_value(value: &TomlValue) -> Value {
    match value {
        TomlValue::String(s) => Value::String(s.value().clone()),
        TomlValue::Integer(i) => Value::Number((*i.value()).into()),
        TomlValue::Float(f) => serde_json::Number::from_f64(*f.value())
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(f.value().to_string())),
        TomlValue::Boolean(b) => Value::Bool(*b.value()),
        TomlValue::Datetime(d) => Value::String(d.value().to_string()),
        TomlValue::Array(items) => Value::Array(items.iter().map(toml_value_to_value).collect()),
        TomlValue::InlineTable(table) => {
            let mut map = Map::new();
            for (key, value) in table.iter() {
                map.insert(key.to_string(), toml_value_to_value(value));
            }
            Value::Object(map)
        }
    }
}

fn fill_table(table: &mut Table, map: &Map<String, Value>) -> Result<(), FormatError> {
    for (key, value) in map {
        match value {
            Value::Object(inner) => {
                let mut child = Table::new();
                fill_table(&mut child, inner)?;
                // Tables holding nothing but sub-tables need no own header.
                child.set_implicit(
                    !inner.is_empty() && inner.values().all(|v| matches!(v, Value::Object(_))),
                );
                table.insert(key.as_str(), Item::Table(child));
            }
            Value::Array(items) => {
                let mut array = Array::new();
                for item in items {
                    array.push(scalar_value(item)?);
                }
                if !array.is_empty() {
                    make_multiline(&mut array);
                }
                table.insert(key.as_str(), Item::Value(TomlValue::Array(array)));
            }
            scalar => {
                table.insert(key.as_str(), Item::Value(scalar_value(scalar)?));
            }
        }
    }
    Ok(())
}

fn scalar_value(value: &Value) -> Result<TomlValue, FormatError> {
    match value {
        Value::Null => Err(FormatError::Unsupported {
            format: "toml",
            reason: "TOML has no null value".to_string(),
        }),
        Value::Bool(b) => Ok((*b).into()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i.into())
            } else if let Some(f) = n.as_f64() {
                Ok(f.into())
            } else {
                Err(FormatError::Unsupported {
                    format: "toml",
                    reason: format!("number {n} does not fit a TOML integer or float"),
                })
            }
        }
        Value::String(s) => Ok(s.as_str().into()),
        Value::Array(items) => {
            let mut array = Array::new();
            for item in items {
                array.push(scalar_value(item)?);
            }
            Ok(TomlValue::Array(array))
        }
        Value::Object(inner) => {
            let mut table = InlineTable::new();
            for (key, value) in inner {
                table.insert(key.as_str(), scalar_value(value)?);
            }
            Ok(TomlValue::InlineTable(table))
        }
    }
}

fn make_multiline(array: &mut Array) {
    for item in array.iter_mut() {
        item.decor_mut().set_prefix("\n    ");
        item.decor_mut().set_suffix("");
    }
    array.set_trailing("\n");
    array.set_trailing_comma(true);
}
