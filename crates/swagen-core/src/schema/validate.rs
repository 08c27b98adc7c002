//! Structural validation run before a schema enters the AST builder.

use serde_json::Value;

use crate::error::SchemaError;

/// Check a raw schema for structurally malformed constraints.
///
/// Failure is fatal for the owning document's build; this is not a semantic
/// API validator, it only rejects shapes the generator cannot make sense of.
pub fn validate(schema: &Value, name: &str) -> Result<(), SchemaError> {
    let mut errors = Vec::new();
    check(schema, "#", &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::Invalid {
            name: name.to_string(),
            reason: errors.join("; "),
        })
    }
}

fn check(schema: &Value, at: &str, errors: &mut Vec<String>) {
    let Value::Object(map) = schema else {
        return;
    };

    match map.get("type") {
        None | Some(Value::String(_)) => {}
        Some(Value::Array(types)) => {
            if !types.iter().all(Value::is_string) {
                errors.push(format!("{at}: `type` array must contain only strings"));
            }
        }
        Some(_) => errors.push(format!("{at}: `type` must be a string or array of strings")),
    }

    match map.get("enum") {
        None => {}
        Some(Value::Array(values)) if !values.is_empty() => {}
        Some(_) => errors.push(format!("{at}: `enum` must be a non-empty array")),
    }

    if let Some(properties) = map.get("properties") {
        match properties {
            Value::Object(children) => {
                for (key, child) in children {
                    check(child, &format!("{at}/properties/{key}"), errors);
                }
            }
            _ => errors.push(format!("{at}: `properties` must be an object")),
        }
    }

    match map.get("required") {
        None => {}
        Some(Value::Array(names)) if names.iter().all(Value::is_string) => {}
        // Swagger v2 also allows boolean `required` on parameter-ish shapes.
        Some(Value::Bool(_)) => {}
        Some(_) => errors.push(format!("{at}: `required` must be an array of strings")),
    }

    match map.get("items") {
        None | Some(Value::Object(_)) => {
            if let Some(items) = map.get("items") {
                check(items, &format!("{at}/items"), errors);
            }
        }
        Some(Value::Array(items)) => {
            for (idx, item) in items.iter().enumerate() {
                check(item, &format!("{at}/items/{idx}"), errors);
            }
        }
        Some(_) => errors.push(format!("{at}: `items` must be a schema or array of schemas")),
    }

    for key in ["allOf", "anyOf", "oneOf"] {
        match map.get(key) {
            None => {}
            Some(Value::Array(members)) => {
                for (idx, member) in members.iter().enumerate() {
                    check(member, &format!("{at}/{key}/{idx}"), errors);
                }
            }
            Some(_) => errors.push(format!("{at}: `{key}` must be an array")),
        }
    }
}
