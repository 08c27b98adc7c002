//! Cycle-safe resolution of internal `$ref` pointers.

use serde_json::Value;

use crate::error::SchemaError;

/// True when any node of the tree still carries a `$ref` key.
pub fn has_ref(schema: &Value) -> bool {
    match schema {
        Value::Object(map) => {
            map.contains_key("$ref") || map.values().any(has_ref)
        }
        Value::Array(items) => items.iter().any(has_ref),
        _ => false,
    }
}

/// Resolve every internal reference in `schema` against its own tree.
///
/// Non-cyclic references are inlined recursively. A reference that is already
/// on the active resolution path is left in place; named-type cycles are
/// preserved for the AST stage rather than inlined infinitely. Sibling keys
/// of a `$ref` survive the inline and win over the target's keys, so a
/// fragment-composed `title` stays on the root. References that point outside
/// the document (`http://...`, relative files) are left untouched for the
/// document loader. An internal reference with no target is an error; the
/// reference-fixup pass patches those in before this runs.
pub fn dereference(schema: &mut Value) -> Result<(), SchemaError> {
    let root = schema.clone();
    let mut stack = Vec::new();
    resolve(schema, &root, &mut stack)
}

fn resolve(node: &mut Value, root: &Value, stack: &mut Vec<String>) -> Result<(), SchemaError> {
    let ref_path = match node {
        Value::Object(map) => match map.get("$ref") {
            Some(Value::String(ref_path)) => Some(ref_path.clone()),
            _ => None,
        },
        _ => None,
    };

    if let Some(ref_path) = ref_path {
        if !ref_path.starts_with('#') {
            return Ok(());
        }
        if stack.contains(&ref_path) {
            return Ok(());
        }
        let target = root
            .pointer(&pointer_of(&ref_path)?)
            .ok_or_else(|| SchemaError::UnresolvedRef(ref_path.clone()))?
            .clone();

        let mut merged = target;
        if let Value::Object(map) = node {
            map.remove("$ref");
            if let Value::Object(merged) = &mut merged {
                for (key, value) in std::mem::take(map) {
                    merged.insert(key, value);
                }
            }
        }
        *node = merged;

        stack.push(ref_path);
        resolve(node, root, stack)?;
        stack.pop();
        return Ok(());
    }

    match node {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                // The definitions bag resolves lazily, where it is inlined.
                if key == "definitions" {
                    continue;
                }
                resolve(child, root, stack)?;
            }
        }
        Value::Array(items) => {
            for item in items {
                resolve(item, root, stack)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn pointer_of(ref_path: &str) -> Result<String, SchemaError> {
    let pointer = ref_path.trim_start_matches('#');
    if !pointer.starts_with('/') {
        return Err(SchemaError::InvalidRefFormat(ref_path.to_string()));
    }
    Ok(pointer.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn no_refs_is_a_no_op() {
        let mut schema = json!({
            "type": "object",
            "title": "Pet",
            "properties": {"name": {"type": "string"}}
        });
        let before = schema.clone();
        dereference(&mut schema).unwrap();
        assert_eq!(schema, before);
    }

    #[test]
    fn inlines_sibling_definition() {
        let mut schema = json!({
            "type": "object",
            "properties": {"pet": {"$ref": "#/definitions/Pet"}},
            "definitions": {"Pet": {"type": "object", "properties": {"name": {"type": "string"}}}}
        });
        dereference(&mut schema).unwrap();
        let pet = &schema["properties"]["pet"];
        assert!(pet.get("$ref").is_none());
        assert_eq!(pet["properties"]["name"]["type"], "string");
    }

    #[test]
    fn sibling_keys_survive_the_inline() {
        let mut schema = json!({
            "title": "ListPetsResponse",
            "$ref": "#/definitions/Pet",
            "definitions": {"Pet": {"type": "object", "title": "Pet"}}
        });
        dereference(&mut schema).unwrap();
        assert_eq!(schema["title"], "ListPetsResponse");
        assert_eq!(schema["type"], "object");
        assert!(schema.get("$ref").is_none());
    }

    #[test]
    fn preserves_cyclic_refs() {
        let mut schema = json!({
            "title": "Node",
            "type": "object",
            "properties": {"next": {"$ref": "#/definitions/Node"}},
            "definitions": {
                "Node": {
                    "title": "Node",
                    "type": "object",
                    "properties": {"next": {"$ref": "#/definitions/Node"}}
                }
            }
        });
        dereference(&mut schema).unwrap();
        // One level inlined, the cycle below survives as a ref.
        let next = &schema["properties"]["next"];
        assert_eq!(next["title"], "Node");
        assert_eq!(
            next["properties"]["next"]["$ref"],
            "#/definitions/Node"
        );
    }

    #[test]
    fn dangling_ref_is_an_error() {
        let mut schema = json!({"$ref": "#/definitions/Missing", "definitions": {}});
        assert!(matches!(
            dereference(&mut schema),
            Err(SchemaError::UnresolvedRef(path)) if path == "#/definitions/Missing"
        ));
    }

    #[test]
    fn external_refs_are_left_untouched() {
        let mut schema = json!({"$ref": "http://example.com/pet.json"});
        dereference(&mut schema).unwrap();
        assert_eq!(schema["$ref"], "http://example.com/pet.json");
    }

    #[test]
    fn has_ref_scans_the_whole_tree() {
        assert!(has_ref(&json!({"items": {"$ref": "#/definitions/X"}})));
        assert!(!has_ref(&json!({"type": "object"})));
    }
}
