use swagen_core::config::{BuildOptions, Language};
use swagen_core::document::{Document, from_json};
use swagen_core::error::GenerateError;
use swagen_core::fragment::FragmentSet;
use swagen_core::generate::{Generator, GeneratorOptions};
use swagen_core::{Pipeline, PipelineError};

const PETSTORE: &str = r##"{
    "swagger": "2.0",
    "info": {"title": "Petstore", "version": "1.0"},
    "paths": {
        "/pets": {
            "get": {
                "operationId": "listPets",
                "responses": {
                    "200": {
                        "description": "ok",
                        "schema": {"type": "array", "items": {"$ref": "#/definitions/Pet"}}
                    }
                }
            }
        }
    },
    "definitions": {
        "Pet": {
            "type": "object",
            "properties": {"name": {"type": "string"}},
            "required": ["name"]
        }
    }
}"##;

/// Test generator that reports which fragments reached it.
struct ProbeGenerator;

impl Generator for ProbeGenerator {
    fn language(&self) -> Language {
        Language::Ts
    }

    fn generate(
        &self,
        fragments: &FragmentSet,
        _document: &Document,
        _options: &GeneratorOptions,
    ) -> Result<String, GenerateError> {
        let definitions: Vec<&str> = fragments.definitions.keys().map(String::as_str).collect();
        let requests: Vec<&str> = fragments.requests.keys().map(String::as_str).collect();
        Ok(format!(
            "definitions={} requests={}",
            definitions.join(","),
            requests.join(",")
        ))
    }
}

fn options(language: Language) -> BuildOptions {
    let mut options = BuildOptions {
        silent: true,
        ..BuildOptions::default()
    };
    options.output.language = language;
    options
}

#[test]
fn pipeline_feeds_fragments_to_the_selected_generator() {
    let document = from_json(PETSTORE).unwrap();
    let mut pipeline = Pipeline::new(options(Language::Ts)).unwrap();
    pipeline.register_generator(Box::new(ProbeGenerator));
    let output = pipeline.build(document).unwrap();
    assert_eq!(
        output.code,
        "definitions=Pet requests=ListPetsRequest\n"
    );
    assert!(output.written_to.is_none());
}

#[test]
fn unknown_language_silently_yields_empty_code() {
    let document = from_json(PETSTORE).unwrap();
    // Only a ts generator is registered; a js build finds nothing.
    let mut pipeline = Pipeline::new(options(Language::Js)).unwrap();
    pipeline.register_generator(Box::new(ProbeGenerator));
    let output = pipeline.build(document).unwrap();
    assert_eq!(output.code, "");
}

#[test]
fn intro_and_outro_wrap_the_generated_code() {
    let document = from_json(PETSTORE).unwrap();
    let mut build_options = options(Language::Ts);
    build_options.output.intro = "// begin".to_string();
    build_options.output.outro = "// end".to_string();
    let mut pipeline = Pipeline::new(build_options).unwrap();
    pipeline.register_generator(Box::new(ProbeGenerator));
    let output = pipeline.build(document).unwrap();
    assert!(output.code.starts_with("// begin\n"));
    assert!(output.code.ends_with("// end\n"));
}

#[test]
fn unknown_plugin_name_is_fatal() {
    let mut build_options = options(Language::Ts);
    build_options.plugins = vec!["no-such-plugin".to_string()];
    let err = Pipeline::new(build_options).unwrap_err();
    assert!(matches!(err, PipelineError::UnknownPlugin { ref name, .. } if name == "no-such-plugin"));
}

#[test]
fn writes_output_and_debug_sidecar() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("client.ts");

    let document = from_json(PETSTORE).unwrap();
    let mut build_options = options(Language::Ts);
    build_options.output.path = out_path.display().to_string();
    build_options.debug = true;
    let mut pipeline = Pipeline::new(build_options).unwrap();
    pipeline.register_generator(Box::new(ProbeGenerator));
    let output = pipeline.build(document).unwrap();

    assert_eq!(output.written_to.as_deref(), Some(out_path.as_path()));
    let written = std::fs::read_to_string(&out_path).unwrap();
    assert!(written.contains("definitions=Pet"));

    let sidecar = std::fs::read_to_string(dir.path().join("client.ts.json")).unwrap();
    assert!(sidecar.contains("\"swagger\": \"2.0\""));
}

#[test]
fn rebuilding_the_same_input_is_deterministic() {
    let build = || {
        let document = from_json(PETSTORE).unwrap();
        let mut pipeline = Pipeline::new(options(Language::Ts)).unwrap();
        pipeline.register_generator(Box::new(ProbeGenerator));
        pipeline.build(document).unwrap().code
    };
    assert_eq!(build(), build());
}
