//! Conversion of an operation's parameter list into JSON Schema shapes.

use indexmap::IndexMap;
use serde_json::{Map, Value, json};

use crate::document::{Parameter, ParameterLocation};

/// Convert resolved parameters into a mapping from location to JSON Schema.
///
/// Each non-body location (`query`, `header`, `path`, `formData`) becomes an
/// object schema whose properties are the parameters declared there, built
/// from their inline schema keywords. A `body` parameter contributes its
/// declared schema verbatim under the `body` key. An empty parameter list
/// yields an empty map; callers special-case that into a null-typed request
/// schema, since "no parameters" is not the same as an empty object.
pub fn parameters_to_schemas(parameters: &[Parameter]) -> IndexMap<String, Value> {
    let mut out: IndexMap<String, Value> = IndexMap::new();

    for parameter in parameters {
        if parameter.location == ParameterLocation::Body {
            let schema = parameter.schema.clone().unwrap_or(json!({}));
            out.insert("body".to_string(), schema);
            continue;
        }

        let key = parameter.location.as_str().to_string();
        let group = out
            .entry(key)
            .or_insert_with(|| json!({"type": "object", "properties": {}, "required": []}));

        let Value::Object(group) = group else {
            continue;
        };
        if let Some(Value::Object(properties)) = group.get_mut("properties") {
            properties.insert(parameter.name.clone(), property_schema(parameter));
        }
        if parameter.required
            && let Some(Value::Array(required)) = group.get_mut("required")
        {
            required.push(Value::String(parameter.name.clone()));
        }
    }

    // An object schema with an empty required list round-trips as no
    // constraint at all.
    for group in out.values_mut() {
        let empty = matches!(group.get("required"), Some(Value::Array(names)) if names.is_empty());
        if empty && let Value::Object(map) = group {
            map.remove("required");
        }
    }

    out
}

/// Reshape a non-body parameter's inline keywords into a property schema.
fn property_schema(parameter: &Parameter) -> Value {
    let mut schema = Map::new();
    for (key, value) in &parameter.keywords {
        match key.as_str() {
            // Swagger-only keys that are not JSON Schema vocabulary.
            "collectionFormat" | "allowEmptyValue" => {}
            _ => {
                schema.insert(key.clone(), value.clone());
            }
        }
    }
    if let Some(description) = &parameter.description {
        schema.insert(
            "description".to_string(),
            Value::String(description.clone()),
        );
    }
    Value::Object(schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parameter(name: &str, location: ParameterLocation, required: bool) -> Parameter {
        Parameter {
            name: name.to_string(),
            location,
            description: None,
            required,
            schema: None,
            keywords: IndexMap::from([("type".to_string(), json!("string"))]),
        }
    }

    #[test]
    fn empty_parameters_yield_empty_map() {
        assert!(parameters_to_schemas(&[]).is_empty());
    }

    #[test]
    fn groups_by_location() {
        let params = vec![
            parameter("limit", ParameterLocation::Query, false),
            parameter("petId", ParameterLocation::Path, true),
            parameter("X-Trace", ParameterLocation::Header, false),
        ];
        let schemas = parameters_to_schemas(&params);
        assert_eq!(
            schemas.keys().collect::<Vec<_>>(),
            vec!["query", "path", "header"]
        );
        assert_eq!(schemas["query"]["properties"]["limit"]["type"], "string");
        assert_eq!(schemas["path"]["required"], json!(["petId"]));
        assert!(schemas["query"].get("required").is_none());
    }

    #[test]
    fn body_schema_passes_through() {
        let mut body = parameter("payload", ParameterLocation::Body, true);
        body.keywords.clear();
        body.schema = Some(json!({"$ref": "#/definitions/Pet"}));
        let schemas = parameters_to_schemas(&[body]);
        assert_eq!(schemas["body"], json!({"$ref": "#/definitions/Pet"}));
    }

    #[test]
    fn keeps_enum_and_format_keywords() {
        let mut param = parameter("status", ParameterLocation::Query, false);
        param
            .keywords
            .insert("enum".to_string(), json!(["available", "sold"]));
        param.description = Some("filter".to_string());
        let schemas = parameters_to_schemas(&[param]);
        let prop = &schemas["query"]["properties"]["status"];
        assert_eq!(prop["enum"], json!(["available", "sold"]));
        assert_eq!(prop["description"], "filter");
    }
}
