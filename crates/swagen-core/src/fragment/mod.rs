pub mod collectors;
pub mod definition;
pub mod operation;

pub use collectors::{DefinitionCollector, OperationCollector};
pub use definition::DefinitionFragment;
pub use operation::{OperationMeta, OperationRequestFragment, OperationResponseFragment};

use indexmap::IndexMap;

use crate::document::visit::visit_document;
use crate::document::Document;

/// Every fragment collected from one document, keyed by title.
#[derive(Debug, Default)]
pub struct FragmentSet {
    pub definitions: IndexMap<String, DefinitionFragment>,
    pub requests: IndexMap<String, OperationRequestFragment>,
    pub responses: IndexMap<String, OperationResponseFragment>,
}

/// Run the fragment visitors over the document (two independent full
/// traversals) and patch each collected definition's `title` into its
/// document node, so inlined copies of a definition keep carrying the name
/// they were registered under.
pub fn collect_fragments(document: &mut Document) -> FragmentSet {
    let mut definitions = DefinitionCollector::default();
    visit_document(document, &mut definitions);

    let mut operations = OperationCollector::default();
    visit_document(document, &mut operations);

    for fragment in definitions.definitions.values() {
        document.set_definition_title(&fragment.name, fragment.title());
    }

    FragmentSet {
        definitions: definitions.definitions,
        requests: operations.requests,
        responses: operations.responses,
    }
}
