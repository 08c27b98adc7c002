//! Tree visitors that partition the document into fragment collections.

use indexmap::IndexMap;
use serde_json::Value;

use super::definition::DefinitionFragment;
use super::operation::{OperationMeta, OperationRequestFragment, OperationResponseFragment};
use crate::document::visit::{DocumentVisitor, OperationContext};

/// Collects one fragment per schema definition, keyed by title.
///
/// Two definitions sanitizing to the same title silently overwrite each
/// other: last write wins, no error raised.
#[derive(Debug, Default)]
pub struct DefinitionCollector {
    pub definitions: IndexMap<String, DefinitionFragment>,
}

impl DocumentVisitor for DefinitionCollector {
    fn visit_schema_definition(&mut self, name: &str, _schema: &Value) {
        let fragment = DefinitionFragment::new(name);
        self.definitions
            .insert(fragment.title().to_string(), fragment);
    }
}

/// Collects a request and a response fragment for every operation, keyed by
/// their titles into separate mappings.
#[derive(Debug, Default)]
pub struct OperationCollector {
    pub requests: IndexMap<String, OperationRequestFragment>,
    pub responses: IndexMap<String, OperationResponseFragment>,
}

impl DocumentVisitor for OperationCollector {
    fn visit_operation(&mut self, ctx: &OperationContext<'_>) {
        let meta = OperationMeta::from_context(ctx);
        let request = OperationRequestFragment::new(meta.clone());
        let response = OperationResponseFragment::new(meta);
        self.requests.insert(request.title().to_string(), request);
        self.responses
            .insert(response.title().to_string(), response);
    }
}
