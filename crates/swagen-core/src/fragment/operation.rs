use indexmap::IndexMap;
use serde_json::{Map, Value, json};

use crate::document::visit::OperationContext;
use crate::document::{Document, HttpMethod, Parameter, ParameterOrRef, Response, ResponseOrRef};
use crate::naming;
use crate::params;

/// Metadata snapshot of one operation, shared by its request and response
/// fragments.
#[derive(Debug, Clone)]
pub struct OperationMeta {
    /// `operationId`, or a route-derived name when the document omits one.
    pub id: String,
    pub method: HttpMethod,
    pub path: String,
    pub deprecated: bool,
    pub summary: Option<String>,
    pub description: Option<String>,
    /// Path-level parameters first, then operation-level, refs unresolved.
    pub parameters: Vec<ParameterOrRef>,
    pub responses: IndexMap<String, ResponseOrRef>,
}

impl OperationMeta {
    pub fn from_context(ctx: &OperationContext<'_>) -> Self {
        let operation = ctx.operation;
        let id = operation
            .operation_id
            .clone()
            .unwrap_or_else(|| naming::route_name(ctx.method.as_str(), ctx.path));
        let mut parameters = ctx.path_parameters.to_vec();
        parameters.extend(operation.parameters.iter().cloned());
        Self {
            id,
            method: ctx.method,
            path: ctx.path.to_string(),
            deprecated: operation.deprecated.unwrap_or(false),
            summary: operation.summary.clone(),
            description: operation.description.clone(),
            parameters,
            responses: operation.responses.clone(),
        }
    }

    /// One-line human introduction: whitespace-collapsed summary and
    /// description, dash-joined when both are present.
    pub fn introduction(&self) -> String {
        let summary = collapse_whitespace(self.summary.as_deref().unwrap_or(""));
        let description = collapse_whitespace(self.description.as_deref().unwrap_or(""));
        match (summary.is_empty(), description.is_empty()) {
            (false, false) => format!("{summary} - {description}"),
            (false, true) => summary,
            (true, false) => description,
            (true, true) => String::new(),
        }
    }

    pub fn status_codes(&self) -> Vec<&str> {
        self.responses.keys().map(String::as_str).collect()
    }

    /// Status codes in the 200–299 range, in document order. The comparison
    /// is over the code strings, matching how documents declare them.
    pub fn success_codes(&self) -> Vec<&str> {
        self.status_codes()
            .into_iter()
            .filter(|code| *code >= "200" && *code <= "299")
            .collect()
    }

    pub fn fail_codes(&self) -> Vec<&str> {
        self.status_codes()
            .into_iter()
            .filter(|code| *code < "200" || *code > "299")
            .collect()
    }

    pub fn has_parameters(&self) -> bool {
        !self.parameters.is_empty()
    }

    /// Declared parameters with `#/parameters/...` refs resolved against the
    /// document; unresolvable refs are skipped (the fixup pass stubs any the
    /// document dangles).
    pub fn resolved_parameters(&self, document: &Document) -> Vec<Parameter> {
        self.parameters
            .iter()
            .filter_map(|parameter| match parameter {
                ParameterOrRef::Parameter(parameter) => Some(parameter.as_ref().clone()),
                ParameterOrRef::Ref { ref_path } => {
                    document.resolve_parameter(ref_path).cloned()
                }
            })
            .collect()
    }

    fn resolved_response<'a>(&'a self, document: &'a Document, code: &str) -> Option<&'a Response> {
        match self.responses.get(code)? {
            ResponseOrRef::Response(response) => Some(response),
            ResponseOrRef::Ref { ref_path } => document.resolve_response(ref_path),
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// An operation's parameter list as a codegen-addressable request shape.
#[derive(Debug, Clone)]
pub struct OperationRequestFragment {
    pub meta: OperationMeta,
    title: String,
}

impl OperationRequestFragment {
    pub fn new(meta: OperationMeta) -> Self {
        let title = naming::sanitize(&naming::upper_first(&format!("{}Request", meta.id)));
        Self { meta, title }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    /// The paired response type name: the `Request` suffix swapped for
    /// `Response`.
    pub fn response_title(&self) -> String {
        match self.title.strip_suffix("Request") {
            Some(stem) => format!("{stem}Response"),
            None => format!("{}Response", self.title),
        }
    }

    /// Synthesized request-object schema.
    ///
    /// Parameter groups become required top-level properties, with `query`
    /// renamed to `params` and `body` to `data` to match conventional HTTP
    /// client call shapes. No parameters means a null-typed schema; an
    /// empty required-properties object would claim "accepts an empty
    /// object", which is not the same contract.
    pub fn schema(&self, document: &Document) -> Value {
        let parameters = self.meta.resolved_parameters(document);
        if parameters.is_empty() {
            return json!({"type": "null", "title": self.title});
        }

        let mut properties = params::parameters_to_schemas(&parameters);
        if let Some(query) = properties.shift_remove("query") {
            properties.insert("params".to_string(), query);
        }
        if let Some(body) = properties.shift_remove("body") {
            properties.insert("data".to_string(), body);
        }
        let required: Vec<&String> = properties.keys().collect();

        json!({
            "type": "object",
            "title": self.title,
            "properties": properties,
            "required": required,
            "additionalProperties": false,
            "definitions": document.definitions_value(),
        })
    }
}

/// An operation's success response as a codegen-addressable unit.
#[derive(Debug, Clone)]
pub struct OperationResponseFragment {
    pub meta: OperationMeta,
    title: String,
}

impl OperationResponseFragment {
    pub fn new(meta: OperationMeta) -> Self {
        let title = naming::sanitize(&naming::upper_first(&format!("{}Response", meta.id)));
        Self { meta, title }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    /// Schema of the first declared 2xx response; null-typed when the
    /// operation has no success response (or it carries no schema).
    pub fn schema(&self, document: &Document) -> Value {
        let response_schema = self
            .meta
            .success_codes()
            .first()
            .copied()
            .map(str::to_string)
            .and_then(|code| self.meta.resolved_response(document, &code))
            .and_then(|response| response.schema.clone());

        match response_schema {
            Some(Value::Object(schema)) => {
                let mut out = Map::new();
                out.insert("title".to_string(), Value::String(self.title.clone()));
                // The response schema's own keys win, title included.
                for (key, value) in schema {
                    out.insert(key, value);
                }
                out.insert("definitions".to_string(), document.definitions_value());
                Value::Object(out)
            }
            _ => json!({"type": "null", "title": self.title}),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::from_json;
    use crate::document::visit::{DocumentVisitor, visit_document};

    fn document() -> Document {
        from_json(
            r##"{
                "swagger": "2.0",
                "info": {"title": "T", "version": "1"},
                "paths": {
                    "/pets": {
                        "get": {
                            "operationId": "listPets",
                            "summary": "List  every\npet",
                            "parameters": [
                                {"name": "limit", "in": "query", "type": "integer"}
                            ],
                            "responses": {
                                "200": {
                                    "description": "ok",
                                    "schema": {"type": "array", "items": {"$ref": "#/definitions/Pet"}}
                                },
                                "404": {"description": "missing"}
                            }
                        },
                        "post": {
                            "operationId": "createPet",
                            "deprecated": true,
                            "parameters": [
                                {"name": "payload", "in": "body", "schema": {"$ref": "#/definitions/Pet"}}
                            ],
                            "responses": {"204": {"description": "created"}}
                        },
                        "delete": {
                            "operationId": "purgePets",
                            "responses": {"400": {"description": "nope"}}
                        }
                    }
                },
                "definitions": {"Pet": {"type": "object"}}
            }"##,
        )
        .unwrap()
    }

    #[derive(Default)]
    struct Grab(Vec<OperationMeta>);

    impl DocumentVisitor for Grab {
        fn visit_operation(&mut self, ctx: &OperationContext<'_>) {
            self.0.push(OperationMeta::from_context(ctx));
        }
    }

    fn metas() -> Vec<OperationMeta> {
        let mut grab = Grab::default();
        visit_document(&document(), &mut grab);
        grab.0
    }

    #[test]
    fn meta_snapshot() {
        let metas = metas();
        let list = &metas[0];
        assert_eq!(list.id, "listPets");
        assert_eq!(list.method.as_str(), "GET");
        assert_eq!(list.path, "/pets");
        assert_eq!(list.introduction(), "List every pet");
        assert_eq!(list.success_codes(), vec!["200"]);
        assert_eq!(list.fail_codes(), vec!["404"]);
        assert!(metas[1].deprecated);
        assert_eq!(metas[1].success_codes(), vec!["204"]);
    }

    #[test]
    fn request_titles() {
        let metas = metas();
        let request = OperationRequestFragment::new(metas[0].clone());
        assert_eq!(request.title(), "ListPetsRequest");
        assert_eq!(request.response_title(), "ListPetsResponse");
    }

    #[test]
    fn request_schema_renames_query_and_body() {
        let document = document();
        let metas = metas();

        let list = OperationRequestFragment::new(metas[0].clone());
        let schema = list.schema(&document);
        assert_eq!(schema["type"], "object");
        assert!(schema["properties"]["params"]["properties"]["limit"].is_object());
        assert_eq!(schema["required"], json!(["params"]));
        assert_eq!(schema["additionalProperties"], json!(false));

        let create = OperationRequestFragment::new(metas[1].clone());
        let schema = create.schema(&document);
        assert_eq!(schema["properties"]["data"]["$ref"], "#/definitions/Pet");
    }

    #[test]
    fn empty_parameters_mean_null_request() {
        let document = document();
        let metas = metas();
        let purge = OperationRequestFragment::new(metas[2].clone());
        assert!(!purge.meta.has_parameters());
        let schema = purge.schema(&document);
        assert_eq!(schema["type"], "null");
        assert_eq!(schema["title"], "PurgePetsRequest");
    }

    #[test]
    fn response_schema_merges_first_success() {
        let document = document();
        let metas = metas();
        let response = OperationResponseFragment::new(metas[0].clone());
        let schema = response.schema(&document);
        assert_eq!(schema["title"], "ListPetsResponse");
        assert_eq!(schema["type"], "array");
        assert!(schema["definitions"]["Pet"].is_object());
    }

    #[test]
    fn no_success_response_is_null_typed() {
        let document = document();
        let metas = metas();
        let response = OperationResponseFragment::new(metas[2].clone());
        let schema = response.schema(&document);
        assert_eq!(schema["type"], "null");
    }

    #[test]
    fn missing_operation_id_derives_from_route() {
        let document = from_json(
            r#"{
                "swagger": "2.0",
                "info": {"title": "T", "version": "1"},
                "paths": {"/pets/{petId}": {"get": {"responses": {"200": {"description": "ok"}}}}}
            }"#,
        )
        .unwrap();
        let mut grab = Grab::default();
        visit_document(&document, &mut grab);
        assert_eq!(grab.0[0].id, "getPets");
    }
}
