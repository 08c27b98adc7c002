//! The lifecycle-hook interface plugins implement.

use std::path::Path;

use crate::config::BuildOptions;
use crate::document::Document;
use crate::error::PipelineError;
use crate::fragment::{DefinitionFragment, OperationRequestFragment, OperationResponseFragment};
use crate::generate::GeneratorOptions;
use crate::plugins;

/// One optional callback per pipeline lifecycle event, invoked in plugin
/// registration order. Plugins get the live document and fragments and may
/// mutate them in place; `on_code` is a waterfall over the generated text.
pub trait Plugin: std::fmt::Debug {
    fn name(&self) -> &str;

    fn on_apply(&mut self) {}
    fn on_options(&mut self, _options: &mut BuildOptions) {}
    fn on_document(&mut self, _document: &mut Document) {}
    fn on_definition_fragment(
        &mut self,
        _fragment: &mut DefinitionFragment,
        _document: &mut Document,
    ) {
    }
    fn on_request_fragment(
        &mut self,
        _fragment: &mut OperationRequestFragment,
        _document: &mut Document,
    ) {
    }
    fn on_response_fragment(
        &mut self,
        _fragment: &mut OperationResponseFragment,
        _document: &mut Document,
    ) {
    }
    fn before_generate(&mut self, _options: &GeneratorOptions) {}
    fn on_code(&mut self, code: String) -> String {
        code
    }
    fn after_write(&mut self, _path: &Path, _code: &str) {}
}

/// Where plugin names resolve from, quoted in lookup failures.
pub const PLUGIN_REGISTRY: &str = "swagen_core::plugins";

/// Resolve a built-in plugin by name. Unknown names are fatal.
pub fn create_plugin(name: &str) -> Result<Box<dyn Plugin>, PipelineError> {
    match name {
        "fix-ref" => Ok(Box::new(plugins::FixRefPlugin::default())),
        "hash-names" => Ok(Box::new(plugins::HashNamesPlugin::default())),
        "log" => Ok(Box::new(plugins::LogPlugin)),
        _ => Err(PipelineError::UnknownPlugin {
            name: name.to_string(),
            registry: PLUGIN_REGISTRY,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_builtins() {
        assert_eq!(create_plugin("fix-ref").unwrap().name(), "fix-ref");
        assert_eq!(create_plugin("hash-names").unwrap().name(), "hash-names");
        assert_eq!(create_plugin("log").unwrap().name(), "log");
    }

    #[test]
    fn unknown_plugin_is_fatal_and_names_the_registry() {
        let err = create_plugin("does-not-exist").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("does-not-exist"));
        assert!(message.contains(PLUGIN_REGISTRY));
    }
}
