//! Plain-JS operation stub emission with JSDoc tag blocks.

use minijinja::{Environment, context};
use swagen_core::GeneratorOptions;
use swagen_core::error::GenerateError;
use swagen_core::fragment::{FragmentSet, OperationRequestFragment};
use swagen_core::naming;

/// Escape `*/` sequences that would prematurely close JSDoc comment blocks.
fn escape_jsdoc(value: String) -> String {
    value.replace("*/", "*\\/")
}

/// Emit one exported stub per operation request fragment, documented with
/// `@param`/`@deprecated`/`@returns` tags and delegating to the dispatch
/// helper with the HTTP method and literal path template.
pub fn emit_stubs(
    fragments: &FragmentSet,
    options: &GeneratorOptions,
) -> Result<String, GenerateError> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.add_filter("escape_jsdoc", escape_jsdoc);
    env.add_template("operations.js.j2", include_str!("../templates/operations.js.j2"))
        .expect("template should be valid");
    let tmpl = env
        .get_template("operations.js.j2")
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

    let mut tags = Vec::new();
    if has_request {
        tags.push(format!("@param {{{}}} request", fragment.title()));
    }
    if meta.deprecated {
        tags.push("@deprecated".to_string());
    }
    tags.push(format!("@returns {{Promise<{response_type}>}}"));

    context! {
        name => naming::sanitize(&meta.id),
        introduction => meta.introduction(),
        method => meta.method.as_str(),
        method_literal => serde_json::to_string(meta.method.as_str()).unwrap_or_default(),
        path => meta.path.clone(),
        path_literal => serde_json::to_string(&meta.path).unwrap_or_default(),
        has_request => has_request,
        tags => tags,
    }
}
