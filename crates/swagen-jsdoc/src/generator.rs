use swagen_core::ast::Arena;
use swagen_core::document::Document;
use swagen_core::error::GenerateError;
use swagen_core::fragment::FragmentSet;
use swagen_core::generate::{self, Generator, GeneratorOptions};
use swagen_core::{Language, ModuleFormat};

use crate::operations;
use crate::typedefs::{EmitOptions, emit_typedefs};

/// Statement separating the typedef section from the API stubs; kept as an
/// expression so pretty-printers leave it in place.
const SECTION_DELIMITER: &str =
    "void 'A DELIMITER LINE DISTINGUISH TYPE-DEFS AND API DEFINITIONS';";

/// Doc-comment style JavaScript generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsGenerator;

impl Generator for JsGenerator {
    fn language(&self) -> Language {
        Language::Js
    }

    fn generate(
        &self,
        fragments: &FragmentSet,
        document: &Document,
        options: &GeneratorOptions,
    ) -> Result<String, GenerateError> {
        let batches = generate::schema_batches(fragments, document);

        let mut arena = Arena::new();
        let definition_roots = generate::parse_batch(&mut arena, &batches.definitions)?;
        let operation_roots = generate::parse_batch(&mut arena, &batches.operations)?;

        let emit_options = EmitOptions {
            declare_externally_referenced: false,
        };
        let definition_typedefs = emit_batch(&arena, &definition_roots, &emit_options);
        let operation_typedefs = emit_batch(&arena, &operation_roots, &emit_options);
        let stubs = operations::emit_stubs(fragments, options)?;

        Ok([
            dispatch_line(options),
            definition_typedefs,
            operation_typedefs,
            String::new(),
            SECTION_DELIMITER.to_string(),
            stubs,
        ]
        .join("\n"))
    }
}

fn dispatch_line(options: &GeneratorOptions) -> String {
    match options.format {
        ModuleFormat::Es => format!(
            "import {} from '{}';",
            options.helper_name, options.helper
        ),
        ModuleFormat::Cjs => format!(
            "const {} = require('{}');",
            options.helper_name, options.helper
        ),
    }
}

fn emit_batch(arena: &Arena, roots: &[usize], options: &EmitOptions) -> String {
    roots
        .iter()
        .map(|&root| emit_typedefs(arena, root, options))
        .filter(|block| !block.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
