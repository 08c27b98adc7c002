//! The build orchestrator: document → fragments → generator → output.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::BuildOptions;
use crate::document::Document;
use crate::error::PipelineError;
use crate::fragment::collect_fragments;
use crate::generate::{Generator, GeneratorOptions};
use crate::plugin::{Plugin, create_plugin};
use crate::plugins::FixRefPlugin;

/// Result of one document build.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub code: String,
    pub written_to: Option<PathBuf>,
}

/// One pipeline instance per document build. Generators and plugins are
/// injected explicitly; nothing is shared between concurrent pipelines.
pub struct Pipeline {
    options: BuildOptions,
    plugins: Vec<Box<dyn Plugin>>,
    generators: Vec<Box<dyn Generator>>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("options", &self.options)
            .field("plugins", &self.plugins.len())
            .field("generators", &self.generators.len())
            .finish()
    }
}

impl Pipeline {
    /// Create a pipeline with the reference-fixup pass pre-installed.
    pub fn new(options: BuildOptions) -> Result<Self, PipelineError> {
        let mut plugins: Vec<Box<dyn Plugin>> = vec![Box::new(FixRefPlugin)];
        for name in &options.plugins {
            plugins.push(create_plugin(name)?);
        }
        Ok(Self {
            options,
            plugins,
            generators: Vec::new(),
        })
    }

    pub fn add_plugin(&mut self, plugin: Box<dyn Plugin>) {
        self.plugins.push(plugin);
    }

    pub fn register_generator(&mut self, generator: Box<dyn Generator>) {
        self.generators.push(generator);
    }

    /// Run the whole build over one parsed document.
    pub fn build(&mut self, mut document: Document) -> Result<BuildOutput, PipelineError> {
        for plugin in &mut self.plugins {
            plugin.on_apply();
        }

        let mut options = self.options.clone();
        for plugin in &mut self.plugins {
            plugin.on_options(&mut options);
        }

        for plugin in &mut self.plugins {
            plugin.on_document(&mut document);
        }

        let mut fragments = collect_fragments(&mut document);
        for plugin in &mut self.plugins {
            for fragment in fragments.definitions.values_mut() {
                plugin.on_definition_fragment(fragment, &mut document);
            }
            for fragment in fragments.requests.values_mut() {
                plugin.on_request_fragment(fragment, &mut document);
            }
            for fragment in fragments.responses.values_mut() {
                plugin.on_response_fragment(fragment, &mut document);
            }
        }

        let generator_options = GeneratorOptions {
            format: options.output.format,
            language: options.output.language,
            ..GeneratorOptions::default()
        };
        for plugin in &mut self.plugins {
            plugin.before_generate(&generator_options);
        }

        // No generator registered for the selected language yields empty
        // generated code, not an error.
        let generated = match self
            .generators
            .iter()
            .find(|generator| generator.language() == options.output.language)
        {
            Some(generator) => generator.generate(&fragments, &document, &generator_options)?,
            None => String::new(),
        };

        let mut code = tidy(
            &[
                options.output.intro.as_str(),
                generated.as_str(),
                options.output.outro.as_str(),
            ]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("\n"),
        );
        for plugin in &mut self.plugins {
            code = plugin.on_code(code);
        }
        let code = tidy(&code);

        if options.output.path.is_empty() {
            if !options.silent {
                print!("{code}");
            }
            return Ok(BuildOutput {
                code,
                written_to: None,
            });
        }

        let path = PathBuf::from(&options.output.path);
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| PipelineError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, &code).map_err(|source| PipelineError::Write {
            path: path.clone(),
            source,
        })?;

        if options.debug {
            let sidecar = path.with_extension(sidecar_extension(&path));
            let pretty = serde_json::to_string_pretty(&document.write()).unwrap_or_default();
            fs::write(&sidecar, pretty).map_err(|source| PipelineError::Write {
                path: sidecar.clone(),
                source,
            })?;
        }

        for plugin in &mut self.plugins {
            plugin.after_write(&path, &code);
        }

        Ok(BuildOutput {
            code,
            written_to: Some(path),
        })
    }
}

fn sidecar_extension(path: &Path) -> String {
    match path.extension().and_then(|extension| extension.to_str()) {
        Some(extension) => format!("{extension}.json"),
        None => "json".to_string(),
    }
}

/// Whitespace cleanup standing in for the external pretty-printer: strip
/// trailing spaces, collapse runs of blank lines, end with one newline.
pub fn tidy(code: &str) -> String {
    let mut out = String::with_capacity(code.len());
    let mut blank_run = 0;
    for line in code.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    while out.starts_with('\n') {
        out.remove(0);
    }
    out
}
