//! The generator interface and the batch glue shared by every emitter.

use serde_json::Value;

use crate::ast::{self, Arena, NodeId};
use crate::config::{Language, ModuleFormat};
use crate::document::Document;
use crate::error::GenerateError;
use crate::fragment::FragmentSet;
use crate::schema;

/// Options handed to a generator for one build.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    pub format: ModuleFormat,
    pub language: Language,
    /// Module specifier of the request-dispatch helper.
    pub helper: String,
    /// Local binding name the stubs call.
    pub helper_name: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            format: ModuleFormat::Es,
            language: Language::Js,
            helper: "./dispatchRequest".to_string(),
            helper_name: "dispatchRequest".to_string(),
        }
    }
}

/// A code generator for one output language.
pub trait Generator {
    fn language(&self) -> Language;

    fn generate(
        &self,
        fragments: &FragmentSet,
        document: &Document,
        options: &GeneratorOptions,
    ) -> Result<String, GenerateError>;
}

/// Fragment schemas split into the two emission batches: definitions first,
/// then operation request/response schemas as one title-sorted batch. The
/// split keeps definition types grouped ahead of operation types in the
/// output regardless of document declaration order.
#[derive(Debug, Default)]
pub struct SchemaBatches {
    pub definitions: Vec<Value>,
    pub operations: Vec<Value>,
}

pub fn schema_batches(fragments: &FragmentSet, document: &Document) -> SchemaBatches {
    let definitions = fragments
        .definitions
        .values()
        .map(|fragment| fragment.schema(document))
        .collect();

    // Requests without parameters and responses without a success code get
    // no type of their own (their stubs use a void placeholder instead).
    let mut operations: Vec<Value> = fragments
        .requests
        .values()
        .filter(|fragment| fragment.meta.has_parameters())
        .map(|fragment| fragment.schema(document))
        .chain(
            fragments
                .responses
                .values()
                .filter(|fragment| !fragment.meta.success_codes().is_empty())
                .map(|fragment| fragment.schema(document)),
        )
        .collect();

    // Ordinal title sort; equal or missing titles keep encounter order.
    operations.sort_by(|a, b| match (title_of(a), title_of(b)) {
        (Some(a), Some(b)) => a.cmp(b),
        _ => std::cmp::Ordering::Equal,
    });

    SchemaBatches {
        definitions,
        operations,
    }
}

fn title_of(schema: &Value) -> Option<&str> {
    schema.get("title").and_then(Value::as_str)
}

/// Prepare, parse, and optimize one batch of schemas into the build's shared
/// arena, returning the root node per schema in batch order.
pub fn parse_batch(arena: &mut Arena, schemas: &[Value]) -> Result<Vec<NodeId>, GenerateError> {
    schemas
        .iter()
        .map(|schema| {
            let name = title_of(schema).unwrap_or_default().to_string();
            let prepared = schema::prepare(schema.clone(), &name)?;
            let root = ast::parse(arena, &prepared);
            Ok(ast::optimize(arena, root))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::from_json;
    use crate::fragment::collect_fragments;
    use serde_json::json;

    #[test]
    fn batches_split_and_sort_by_title() {
        let mut document = from_json(
            r#"{
                "swagger": "2.0",
                "info": {"title": "T", "version": "1"},
                "paths": {
                    "/beta": {
                        "get": {
                            "operationId": "beta",
                            "parameters": [{"name": "q", "in": "query", "type": "string"}],
                            "responses": {"200": {"description": "ok", "schema": {"type": "string"}}}
                        }
                    },
                    "/alpha": {
                        "get": {
                            "operationId": "alpha",
                            "parameters": [{"name": "q", "in": "query", "type": "string"}],
                            "responses": {"200": {"description": "ok", "schema": {"type": "string"}}}
                        }
                    },
                    "/bare": {
                        "get": {"operationId": "bare", "responses": {"404": {"description": "no"}}}
                    }
                },
                "definitions": {"Zebra": {"type": "object"}}
            }"#,
        )
        .unwrap();
        let fragments = collect_fragments(&mut document);
        let batches = schema_batches(&fragments, &document);

        assert_eq!(batches.definitions.len(), 1);
        assert_eq!(batches.definitions[0]["title"], "Zebra");

        // `bare` contributes neither a request (no parameters) nor a
        // response (no 2xx) schema.
        let titles: Vec<&str> = batches
            .operations
            .iter()
            .filter_map(title_of)
            .collect();
        assert_eq!(
            titles,
            vec![
                "AlphaRequest",
                "AlphaResponse",
                "BetaRequest",
                "BetaResponse"
            ]
        );
    }

    #[test]
    fn equal_titles_keep_encounter_order() {
        let a = json!({"title": "Same", "marker": 1});
        let b = json!({"title": "Same", "marker": 2});
        let mut batch = vec![a.clone(), b.clone()];
        batch.sort_by(|x, y| match (title_of(x), title_of(y)) {
            (Some(x), Some(y)) => x.cmp(y),
            _ => std::cmp::Ordering::Equal,
        });
        assert_eq!(batch[0]["marker"], 1);
        assert_eq!(batch[1]["marker"], 2);
    }
}
