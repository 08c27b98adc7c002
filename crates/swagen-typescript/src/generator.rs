use swagen_core::ast::Arena;
use swagen_core::document::Document;
use swagen_core::error::GenerateError;
use swagen_core::fragment::FragmentSet;
use swagen_core::generate::{self, Generator, GeneratorOptions};
use swagen_core::{Language, ModuleFormat};

use crate::declarations::{EmitOptions, emit_declarations};
use crate::operations;

/// Interface-style TypeScript generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct TsGenerator;

impl Generator for TsGenerator {
    fn language(&self) -> Language {
        Language::Ts
    }

    fn generate(
        &self,
        fragments: &FragmentSet,
        document: &Document,
        options: &GeneratorOptions,
    ) -> Result<String, GenerateError> {
        let batches = generate::schema_batches(fragments, document);

        // One arena for the whole build, so definition shapes inlined into
        // operation schemas resolve back to their declared names.
        let mut arena = Arena::new();
        let definition_roots = generate::parse_batch(&mut arena, &batches.definitions)?;
        let operation_roots = generate::parse_batch(&mut arena, &batches.operations)?;

        let emit_options = EmitOptions {
            declare_externally_referenced: false,
        };
        let definitions = emit_batch(&arena, &definition_roots, &emit_options);
        let operation_types = emit_batch(&arena, &operation_roots, &emit_options);
        let stubs = operations::emit_stubs(fragments, options)?;

        Ok([
            dispatch_import(options),
            String::new(),
            definitions,
            operation_types,
            stubs,
        ]
        .join("\n"))
    }
}

fn dispatch_import(options: &GeneratorOptions) -> String {
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
        .map(|&root| emit_declarations(arena, root, options))
        .filter(|declaration| !declaration.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
