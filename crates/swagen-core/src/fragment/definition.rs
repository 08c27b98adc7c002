use serde_json::{Map, Value};

use crate::document::Document;
use crate::naming;

/// A schema definition as a codegen-addressable unit.
#[derive(Debug, Clone)]
pub struct DefinitionFragment {
    /// The key under `definitions` this fragment points at.
    pub name: String,
    title: String,
}

impl DefinitionFragment {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            title: naming::sanitize(name),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Plugins may rewrite the title (e.g. to dodge collisions); the schema
    /// keyed under the old title is unaffected, only emission changes.
    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    /// The self-contained JSON Schema view of this definition, computed
    /// against the current document so plugin mutations are reflected.
    ///
    /// The definition node's own keys (title included, when a plugin patched
    /// one in) win over the fragment title.
    pub fn schema(&self, document: &Document) -> Value {
        let mut out = Map::new();
        out.insert("title".to_string(), Value::String(self.title.clone()));
        if let Some(Value::Object(definition)) = document.definitions.get(&self.name) {
            for (key, value) in definition {
                out.insert(key.clone(), value.clone());
            }
        }
        out.insert("definitions".to_string(), document.definitions_value());
        Value::Object(out)
    }
}
