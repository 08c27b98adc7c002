pub mod dereference;
pub mod normalize;
pub mod validate;

pub use dereference::{dereference, has_ref};
pub use normalize::normalize;
pub use validate::validate;

use serde_json::Value;

use crate::error::SchemaError;

/// Turn a raw fragment schema into a self-contained, AST-ready one.
///
/// The `definitions` bag is detached while the root is normalized (so the
/// whole bag is not re-normalized for every fragment carrying it), then
/// reattached before reference resolution. A final normalize pass covers
/// whatever definition bodies got inlined during dereferencing.
pub fn prepare(mut schema: Value, name: &str) -> Result<Value, SchemaError> {
    validate(&schema, name)?;

    let definitions = schema
        .as_object_mut()
        .and_then(|map| map.remove("definitions"));
    normalize(&mut schema);
    if let (Some(definitions), Some(map)) = (definitions, schema.as_object_mut()) {
        map.insert("definitions".to_string(), definitions);
    }

    dereference(&mut schema)?;
    normalize(&mut schema);
    Ok(schema)
}
