use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported swagger version: {0}")]
    UnsupportedVersion(String),
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("schema `{name}` is invalid: {reason}")]
    Invalid { name: String, reason: String },

    #[error("unresolved reference: {0}")]
    UnresolvedRef(String),

    #[error("invalid reference format: {0}")]
    InvalidRefFormat(String),
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("failed to render template: {0}")]
    Render(String),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    #[error("generate error: {0}")]
    Generate(#[from] GenerateError),

    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("unknown plugin `{name}`: not found in the built-in plugin registry ({registry})")]
    UnknownPlugin { name: String, registry: &'static str },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
