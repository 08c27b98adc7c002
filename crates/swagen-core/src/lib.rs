//! Core engine of the swagen code generator: Swagger v2 document model,
//! fragment extraction, JSON Schema normalization and dereferencing, the
//! schema AST, and the generation pipeline. Language emitters live in their
//! own crates and plug in through the [`Generator`] trait.

pub mod ast;
pub mod config;
pub mod document;
pub mod error;
pub mod fragment;
pub mod generate;
pub mod naming;
pub mod params;
pub mod pipeline;
pub mod plugin;
pub mod plugins;
pub mod schema;

pub use config::{BuildOptions, Language, ModuleFormat, OutputOptions, SwagenConfig};
pub use error::{DocumentError, GenerateError, PipelineError, SchemaError};
pub use generate::{Generator, GeneratorOptions};
pub use pipeline::{BuildOutput, Pipeline};
pub use plugin::Plugin;
