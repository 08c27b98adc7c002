//! Recursive document traversal with typed per-node-kind callbacks.
//!
//! This is the only traversal mechanism over the document: visitors get one
//! callback per node kind they care about, with no-op defaults for the rest.

use serde_json::Value;

use super::operation::{HttpMethod, Operation};
use super::parameter::{Parameter, ParameterOrRef};
use super::response::{Response, ResponseOrRef};
use super::spec::Document;

/// The path-item context an operation was encountered under.
#[derive(Debug, Clone, Copy)]
pub struct OperationContext<'a> {
    pub path: &'a str,
    pub method: HttpMethod,
    pub operation: &'a Operation,
    /// Parameters declared on the path item, shared by its operations.
    pub path_parameters: &'a [ParameterOrRef],
}

/// Callbacks invoked during a depth-first document walk.
pub trait DocumentVisitor {
    fn visit_schema(&mut self, _schema: &Value) {}
    fn visit_schema_definition(&mut self, _name: &str, _schema: &Value) {}
    fn visit_operation(&mut self, _ctx: &OperationContext<'_>) {}
    fn visit_parameter(&mut self, _parameter: &Parameter) {}
    fn visit_response(&mut self, _status: &str, _response: &Response) {}
}

/// Walk the whole document, invoking the visitor for every node encountered.
pub fn visit_document(document: &Document, visitor: &mut dyn DocumentVisitor) {
    for (name, schema) in &document.definitions {
        visitor.visit_schema_definition(name, schema);
        walk_schema(schema, visitor);
    }

    for (path, item) in &document.paths {
        for parameter in &item.parameters {
            visit_parameter_or_ref(parameter, visitor);
        }
        for (method, operation) in item.operations() {
            visitor.visit_operation(&OperationContext {
                path,
                method,
                operation,
                path_parameters: &item.parameters,
            });
            for parameter in &operation.parameters {
                visit_parameter_or_ref(parameter, visitor);
            }
            for (status, response) in &operation.responses {
                if let ResponseOrRef::Response(response) = response {
                    visit_response(status, response, visitor);
                }
            }
        }
    }

    for parameter in document.parameters.values() {
        visit_parameter(parameter, visitor);
    }
    for (name, response) in &document.responses {
        visit_response(name, response, visitor);
    }
}

fn visit_parameter_or_ref(parameter: &ParameterOrRef, visitor: &mut dyn DocumentVisitor) {
    if let ParameterOrRef::Parameter(parameter) = parameter {
        visit_parameter(parameter, visitor);
    }
}

fn visit_parameter(parameter: &Parameter, visitor: &mut dyn DocumentVisitor) {
    visitor.visit_parameter(parameter);
    if let Some(schema) = &parameter.schema {
        walk_schema(schema, visitor);
    }
}

fn visit_response(status: &str, response: &Response, visitor: &mut dyn DocumentVisitor) {
    visitor.visit_response(status, response);
    if let Some(schema) = &response.schema {
        walk_schema(schema, visitor);
    }
}

/// Recurse through every subschema position of a JSON Schema value.
fn walk_schema(schema: &Value, visitor: &mut dyn DocumentVisitor) {
    visitor.visit_schema(schema);
    let Value::Object(map) = schema else {
        return;
    };

    for key in ["properties", "definitions"] {
        if let Some(Value::Object(children)) = map.get(key) {
            for child in children.values() {
                walk_schema(child, visitor);
            }
        }
    }
    for key in ["items", "additionalItems", "additionalProperties"] {
        match map.get(key) {
            Some(Value::Object(_)) => walk_schema(&map[key], visitor),
            Some(Value::Array(items)) => {
                for item in items {
                    walk_schema(item, visitor);
                }
            }
            _ => {}
        }
    }
    for key in ["allOf", "anyOf", "oneOf"] {
        if let Some(Value::Array(members)) = map.get(key) {
            for member in members {
                walk_schema(member, visitor);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::from_json;

    #[derive(Default)]
    struct Counter {
        definitions: Vec<String>,
        operations: Vec<String>,
        schemas: usize,
        refs: Vec<String>,
    }

    impl DocumentVisitor for Counter {
        fn visit_schema(&mut self, schema: &Value) {
            self.schemas += 1;
            if let Some(Value::String(ref_path)) = schema.get("$ref") {
                self.refs.push(ref_path.clone());
            }
        }

        fn visit_schema_definition(&mut self, name: &str, _schema: &Value) {
            self.definitions.push(name.to_string());
        }

        fn visit_operation(&mut self, ctx: &OperationContext<'_>) {
            self.operations
                .push(format!("{} {}", ctx.method.as_str(), ctx.path));
        }
    }

    #[test]
    fn walks_definitions_and_operations() {
        let document = from_json(
            r##"{
                "swagger": "2.0",
                "info": {"title": "T", "version": "1"},
                "paths": {
                    "/pets": {
                        "get": {
                            "operationId": "listPets",
                            "responses": {
                                "200": {
                                    "description": "ok",
                                    "schema": {"items": {"$ref": "#/definitions/Pet"}, "type": "array"}
                                }
                            }
                        }
                    }
                },
                "definitions": {
                    "Pet": {
                        "type": "object",
                        "properties": {"owner": {"$ref": "#/definitions/Owner"}}
                    }
                }
            }"##,
        )
        .unwrap();

        let mut counter = Counter::default();
        visit_document(&document, &mut counter);
        assert_eq!(counter.definitions, vec!["Pet"]);
        assert_eq!(counter.operations, vec!["GET /pets"]);
        assert_eq!(
            counter.refs,
            vec!["#/definitions/Owner", "#/definitions/Pet"]
        );
        assert!(counter.schemas >= 4);
    }
}
