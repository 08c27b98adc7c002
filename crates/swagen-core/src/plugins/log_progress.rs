//! Build-progress logging over the lifecycle hooks.

use std::path::Path;

use crate::config::BuildOptions;
use crate::document::Document;
use crate::fragment::{DefinitionFragment, OperationRequestFragment, OperationResponseFragment};
use crate::generate::GeneratorOptions;
use crate::plugin::Plugin;

/// Reports each pipeline stage through the `log` facade.
#[derive(Debug, Clone, Copy)]
pub struct LogPlugin;

impl Plugin for LogPlugin {
    fn name(&self) -> &str {
        "log"
    }

    fn on_apply(&mut self) {
        log::info!("applying plugins");
    }

    fn on_options(&mut self, options: &mut BuildOptions) {
        log::info!(
            "loading options: input={} language={}",
            options.input,
            options.output.language.as_str()
        );
    }

    fn on_document(&mut self, _document: &mut Document) {
        log::info!("creating document model");
    }

    fn on_definition_fragment(
        &mut self,
        fragment: &mut DefinitionFragment,
        _document: &mut Document,
    ) {
        log::debug!("creating definition fragment: {}", fragment.title());
    }

    fn on_request_fragment(
        &mut self,
        fragment: &mut OperationRequestFragment,
        _document: &mut Document,
    ) {
        log::debug!("creating request fragment: {}", fragment.title());
    }

    fn on_response_fragment(
        &mut self,
        fragment: &mut OperationResponseFragment,
        _document: &mut Document,
    ) {
        log::debug!("creating response fragment: {}", fragment.title());
    }

    fn before_generate(&mut self, options: &GeneratorOptions) {
        log::info!("generating {} code", options.language.as_str());
    }

    fn after_write(&mut self, path: &Path, code: &str) {
        log::info!("wrote {} bytes to {}", code.len(), path.display());
    }
}
