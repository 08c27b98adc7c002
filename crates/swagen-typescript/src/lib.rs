//! Interface-style TypeScript generation: named `interface`/`type`
//! declarations from the schema AST plus operation stub functions.

pub mod declarations;
mod generator;
pub mod operations;

pub use declarations::{EmitOptions, emit_declarations};
pub use generator::TsGenerator;
