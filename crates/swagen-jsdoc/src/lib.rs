//! Doc-comment generation: the same schema AST emitted as JSDoc
//! `@typedef`/`@property` blocks plus plain-JS operation stubs.

mod generator;
pub mod operations;
pub mod typedefs;

pub use generator::JsGenerator;
pub use typedefs::{EmitOptions, emit_typedefs};
