//! Operation stub emission.

use minijinja::{Environment, context};
use swagen_core::GeneratorOptions;
use swagen_core::error::GenerateError;
use swagen_core::fragment::{FragmentSet, OperationRequestFragment};
use swagen_core::naming;

/// Escape `*/` sequences that would prematurely close JSDoc comment blocks.
fn escape_jsdoc(value: String) -> String {
    value.replace("*/", "*\\/")
}

/// Emit one exported stub function per operation request fragment. The stub
/// delegates to the externally supplied dispatch helper with the literal
/// path template, forwarding the typed request argument only when the
/// operation declares parameters.
pub fn emit_stubs(
    fragments: &FragmentSet,
    options: &GeneratorOptions,
) -> Result<String, GenerateError> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.add_filter("escape_jsdoc", escape_jsdoc);
    env.add_template("operations.ts.j2", include_str!("../templates/operations.ts.j2"))
        .expect("template should be valid");
    let tmpl = env
        .get_template("operations.ts.j2")
        .expect("template was just added");

    let operations: Vec<minijinja::Value> = fragments
        .requests
        .values()
        .map(operation_ctx)
        .collect();

    tmpl.render(context! {
        operations => operations,
        helper_name => options.helper_name.clone(),
    })
    .map_err(|err| GenerateError::Render(err.to_string()))
}

fn operation_ctx(fragment: &OperationRequestFragment) -> minijinja::Value {
    let meta = &fragment.meta;
    let has_request = meta.has_parameters();
    let response_type = if meta.success_codes().is_empty() {
        "void".to_string()
    } else {
        fragment.response_title()
    };
    context! {
        name => naming::sanitize(&meta.id),
        deprecated => meta.deprecated,
        introduction => meta.introduction(),
        method => meta.method.as_str(),
        path => meta.path.clone(),
        path_literal => serde_json::to_string(&meta.path).unwrap_or_default(),
        has_request => has_request,
        request_type => fragment.title(),
        response_type => response_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swagen_core::document::from_json;
    use swagen_core::fragment::collect_fragments;

    fn fragments() -> FragmentSet {
        let mut document = from_json(
            r#"{
                "swagger": "2.0",
                "info": {"title": "T", "version": "1"},
                "paths": {
                    "/pets": {
                        "get": {
                            "operationId": "listPets",
                            "summary": "List pets",
                            "responses": {"200": {"description": "ok", "schema": {"type": "array", "items": {"type": "string"}}}}
                        },
                        "post": {
                            "operationId": "createPet",
                            "deprecated": true,
                            "parameters": [{"name": "payload", "in": "body", "schema": {"type": "object"}}],
                            "responses": {"400": {"description": "bad"}}
                        }
                    }
                }
            }"#,
        )
        .unwrap();
        collect_fragments(&mut document)
    }

    #[test]
    fn stub_without_parameters_has_no_request_argument() {
        let out = emit_stubs(&fragments(), &GeneratorOptions::default()).unwrap();
        assert!(out.contains("export function listPets(): Promise<ListPetsResponse> {"));
        assert!(out.contains("return dispatchRequest(\"/pets\");"));
        assert!(out.contains("`GET /pets`"));
    }

    #[test]
    fn stub_with_parameters_and_no_success_code() {
        let out = emit_stubs(&fragments(), &GeneratorOptions::default()).unwrap();
        assert!(
            out.contains("export function createPet(request: CreatePetRequest): Promise<void> {")
        );
        assert!(out.contains("return dispatchRequest(\"/pets\", request);"));
        assert!(out.contains("`DEPRECATED` "));
    }
}
