//! Title hashing: trade definition titles for collision-proof identifiers
//! during generation, then restore them in the emitted text.

use indexmap::IndexMap;
use sha2::{Digest, Sha256};

use crate::document::Document;
use crate::fragment::DefinitionFragment;
use crate::plugin::Plugin;

/// Rewrites every definition's title to a hash-derived safe identifier
/// before generation, then reverses the rewrite in the final text via
/// string substitution. Titles that sanitize into each other (or into
/// something illegal) stay distinct under the hash.
#[derive(Debug, Default)]
pub struct HashNamesPlugin {
    /// safe name → original title
    renames: IndexMap<String, String>,
}

fn safe_name(title: &str) -> String {
    let digest = Sha256::digest(title.as_bytes());
    format!("X{}", &hex::encode_upper(digest)[..32])
}

impl Plugin for HashNamesPlugin {
    fn name(&self) -> &str {
        "hash-names"
    }

    fn on_definition_fragment(
        &mut self,
        fragment: &mut DefinitionFragment,
        document: &mut Document,
    ) {
        let safe = safe_name(fragment.title());
        self.renames
            .insert(safe.clone(), fragment.title().to_string());
        document.set_definition_title(&fragment.name, &safe);
    }

    fn on_code(&mut self, mut code: String) -> String {
        for (safe, original) in &self.renames {
            code = code.replace(safe, original);
        }
        code
    }
}
