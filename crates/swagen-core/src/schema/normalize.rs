//! Structural normalization of raw JSON Schema values.

use serde_json::Value;

/// Coerce implicit container types, recursively: a schema with `items` (or an
/// object-shaped `additionalItems`) but no `type` becomes an array schema; a
/// schema with `properties` (or an object-shaped `additionalProperties`) but
/// no `type` becomes an object schema.
///
/// The `definitions` bag is not descended into: callers detach it before
/// normalizing and reattach it afterwards, so the bag is only normalized
/// where it actually gets inlined.
pub fn normalize(schema: &mut Value) {
    let Value::Object(map) = schema else {
        return;
    };

    if !map.contains_key("type") {
        if map.contains_key("items") || matches!(map.get("additionalItems"), Some(Value::Object(_)))
        {
            map.insert("type".to_string(), Value::String("array".to_string()));
        } else if map.contains_key("properties")
            || matches!(map.get("additionalProperties"), Some(Value::Object(_)))
        {
            map.insert("type".to_string(), Value::String("object".to_string()));
        }
    }

    if let Some(Value::Object(properties)) = map.get_mut("properties") {
        for child in properties.values_mut() {
            normalize(child);
        }
    }
    for key in ["items", "additionalItems", "additionalProperties"] {
        match map.get_mut(key) {
            Some(child @ Value::Object(_)) => normalize(child),
            Some(Value::Array(items)) => {
                for item in items {
                    normalize(item);
                }
            }
            _ => {}
        }
    }
    for key in ["allOf", "anyOf", "oneOf"] {
        if let Some(Value::Array(members)) = map.get_mut(key) {
            for member in members {
                normalize(member);
            }
        }
    }
}
