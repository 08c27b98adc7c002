//! The typed intermediate tree built from dereferenced JSON Schemas.
//!
//! Nodes live in a per-build arena and point at each other through integer
//! ids, so cyclic named types need no ownership cycles: a schema title seen
//! twice resolves to the node registered the first time, wrapped in a
//! `Reference`. Emitters traverse read-only with their own visited sets.

mod optimize;
mod parse;

pub use optimize::optimize;
pub use parse::parse;

use indexmap::IndexMap;
use serde_json::Value;

pub type NodeId = usize;

/// Key name given to index-signature params (`additionalProperties`).
pub const INDEX_SIGNATURE_KEY: &str = "[k: string]";

/// One named, typed property of an interface node.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceParam {
    pub key_name: String,
    pub node: NodeId,
    pub required: bool,
}

impl InterfaceParam {
    /// True when this param is an index signature rather than a declared key.
    pub fn is_index_signature(&self) -> bool {
        self.key_name == INDEX_SIGNATURE_KEY
    }
}

/// The tagged variant of a schema AST node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Any,
    /// Element type; `None` means an untyped array.
    Array(Option<NodeId>),
    Boolean,
    /// Verbatim type text from a `tsType` escape hatch.
    Custom(String),
    /// Members are `Literal` nodes.
    Enum(Vec<NodeId>),
    Interface {
        params: Vec<InterfaceParam>,
        super_types: Vec<NodeId>,
    },
    Intersection(Vec<NodeId>),
    Literal(Value),
    Null,
    Number,
    Object,
    /// Second (and later) occurrence of a registered named type.
    Reference(NodeId),
    String,
    Tuple(Vec<NodeId>),
    Union(Vec<NodeId>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    /// When set, this node is emitted as a named, reusable type rather than
    /// being inlined at each use site.
    pub standalone_name: Option<String>,
    pub comment: Option<String>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            standalone_name: None,
            comment: None,
        }
    }
}

/// Build-scoped node storage plus the title → node lookup that makes cyclic
/// named references terminate.
#[derive(Debug, Default)]
pub struct Arena {
    nodes: Vec<Node>,
    by_title: IndexMap<String, NodeId>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(node);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn lookup_title(&self, title: &str) -> Option<NodeId> {
        self.by_title.get(title).copied()
    }

    pub fn register_title(&mut self, title: &str, id: NodeId) {
        self.by_title.insert(title.to_string(), id);
    }

    /// Follow `Reference` links to the referenced node.
    pub fn deref(&self, id: NodeId) -> NodeId {
        let mut id = id;
        let mut hops = 0;
        while let NodeKind::Reference(target) = self.node(id).kind {
            id = target;
            hops += 1;
            if hops > self.nodes.len() {
                break;
            }
        }
        id
    }

    /// The display name a node is referenced by, if any.
    pub fn name_of(&self, id: NodeId) -> Option<&str> {
        self.node(self.deref(id)).standalone_name.as_deref()
    }
}
