use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::operation::PathItem;
use super::parameter::Parameter;
use super::response::Response;

/// Info object describing the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,

    #[serde(default)]
    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(flatten, default, skip_serializing_if = "IndexMap::is_empty")]
    pub extras: IndexMap<String, Value>,
}

/// Top-level Swagger v2 document.
///
/// Schema nodes (`definitions` values, response and body-parameter schemas)
/// are kept as raw JSON values so unknown JSON Schema keywords round-trip
/// through `write` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub swagger: String,

    pub info: Info,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(rename = "basePath", skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub paths: IndexMap<String, PathItem>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub definitions: IndexMap<String, Value>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, Parameter>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, Response>,

    #[serde(flatten, default, skip_serializing_if = "IndexMap::is_empty")]
    pub extras: IndexMap<String, Value>,
}

impl Document {
    /// Serialize the whole document back to a plain JSON value. This is the
    /// bridge every fragment uses to obtain a JSON-Schema-shaped view.
    pub fn write(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Resolve a JSON-pointer-like path (`#/definitions/Pet` or
    /// `/definitions/Pet`) against the written document. Used to test
    /// whether a `$ref` target actually exists.
    pub fn resolve(&self, pointer: &str) -> Option<Value> {
        let pointer = pointer.strip_prefix('#').unwrap_or(pointer);
        let mut node = self.write();
        for segment in pointer.split('/').filter(|s| !s.is_empty()) {
            let segment = segment.replace("~1", "/").replace("~0", "~");
            node = match node {
                Value::Object(mut map) => map.remove(&segment)?,
                Value::Array(mut items) => {
                    let idx: usize = segment.parse().ok()?;
                    if idx < items.len() {
                        items.swap_remove(idx)
                    } else {
                        return None;
                    }
                }
                _ => return None,
            };
        }
        Some(node)
    }

    /// Patch a definition node's `title`, creating no entry when the
    /// definition is missing or not an object.
    pub fn set_definition_title(&mut self, name: &str, title: &str) {
        if let Some(Value::Object(map)) = self.definitions.get_mut(name) {
            map.insert("title".to_string(), Value::String(title.to_string()));
        }
    }

    /// Definitions bag with fragment titles applied, as attached to every
    /// fragment schema.
    pub fn definitions_value(&self) -> Value {
        serde_json::to_value(&self.definitions).unwrap_or(Value::Null)
    }

    /// Look up a reusable parameter by `#/parameters/<name>` reference.
    pub fn resolve_parameter(&self, ref_path: &str) -> Option<&Parameter> {
        let name = ref_path.strip_prefix("#/parameters/")?;
        self.parameters.get(name)
    }

    /// Look up a reusable response by `#/responses/<name>` reference.
    pub fn resolve_response(&self, ref_path: &str) -> Option<&Response> {
        let name = ref_path.strip_prefix("#/responses/")?;
        self.responses.get(name)
    }
}
