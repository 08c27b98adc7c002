//! Reference fixup: repair dangling internal `$ref`s before dereferencing.

use indexmap::IndexSet;
use serde_json::{Value, json};

use crate::document::visit::{DocumentVisitor, visit_document};
use crate::document::{Document, Parameter, Response};
use crate::plugin::Plugin;

/// Visits every schema node, collects the `$ref` strings, and synthesizes a
/// stand-in node for each internal ref with no target: an any-typed empty
/// schema for `definitions`, stub objects for `responses` and `parameters`.
///
/// This is best-effort repair for genuinely broken documents, not
/// validation; nothing is reported to the caller.
#[derive(Debug, Default)]
pub struct FixRefPlugin;

#[derive(Default)]
struct RefCollector {
    refs: IndexSet<String>,
}

impl DocumentVisitor for RefCollector {
    fn visit_schema(&mut self, schema: &Value) {
        if let Some(Value::String(ref_path)) = schema.get("$ref") {
            self.refs.insert(ref_path.clone());
        }
    }
}

impl Plugin for FixRefPlugin {
    fn name(&self) -> &str {
        "fix-ref"
    }

    fn on_document(&mut self, document: &mut Document) {
        let mut collector = RefCollector::default();
        visit_document(document, &mut collector);

        for ref_path in collector.refs {
            let Some(rest) = ref_path.strip_prefix("#/") else {
                continue;
            };
            if document.resolve(&ref_path).is_some() {
                continue;
            }
            let segments: Vec<&str> = rest.split('/').collect();
            let [section, name] = segments.as_slice() else {
                continue;
            };
            log::debug!("patching dangling reference {ref_path}");
            match *section {
                "definitions" => {
                    document.definitions.insert(name.to_string(), json!({}));
                }
                "responses" => {
                    document.responses.insert(name.to_string(), Response::stub());
                }
                "parameters" => {
                    document
                        .parameters
                        .insert(name.to_string(), Parameter::stub(name));
                }
                _ => {}
            }
        }
    }
}
