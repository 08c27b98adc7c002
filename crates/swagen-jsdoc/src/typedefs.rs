//! AST → JSDoc typedef blocks.
//!
//! Two passes per emitted tree: a reference pass that accumulates
//! `@typedef`/`@type` blocks for named non-object types, and a standalone
//! pass that documents each named object type property by property,
//! expanding anonymous nested objects with dotted key paths.

use std::collections::HashSet;

use swagen_core::ast::{Arena, InterfaceParam, NodeId, NodeKind};

/// Emission behavior switches.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// When false, only nodes sharing the emitted root's name are documented;
    /// other named types are referenced by name only.
    pub declare_externally_referenced: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            declare_externally_referenced: true,
        }
    }
}

#[derive(Debug)]
enum Tag {
    Delimiter,
    Text(String),
}

/// Emit the doc-comment blocks for the tree rooted at `root`.
pub fn emit_typedefs(arena: &Arena, root: NodeId, options: &EmitOptions) -> String {
    let mut emitter = Emitter {
        arena,
        options,
        tags: Vec::new(),
    };
    let root_name = arena.node(root).standalone_name.clone();

    let mut processed = HashSet::new();
    emitter.reference_pass(root, root_name.as_deref(), &mut processed);
    let mut processed = HashSet::new();
    emitter.standalone_pass(root, root_name.as_deref(), &mut processed);

    emitter.assemble()
}

struct Emitter<'a> {
    arena: &'a Arena,
    options: &'a EmitOptions,
    tags: Vec<Tag>,
}

impl Emitter<'_> {
    fn reference_pass(&mut self, id: NodeId, root_name: Option<&str>, processed: &mut HashSet<NodeId>) {
        if !processed.insert(id) {
            return;
        }
        let arena = self.arena;
        match &arena.node(id).kind {
            NodeKind::Array(inner) => {
                if let Some(inner) = inner {
                    self.reference_pass(*inner, root_name, processed);
                }
                self.reference_type(id);
            }
            NodeKind::Interface {
                params,
                super_types,
            } => {
                let children: Vec<NodeId> = params
                    .iter()
                    .map(|param| param.node)
                    .chain(super_types.iter().copied())
                    .collect();
                for child in children {
                    let same_name = arena.node(child).standalone_name.as_deref() == root_name;
                    if same_name || self.options.declare_externally_referenced {
                        self.reference_pass(child, root_name, processed);
                    }
                }
            }
            NodeKind::Intersection(members)
            | NodeKind::Tuple(members)
            | NodeKind::Union(members) => {
                for member in members.clone() {
                    self.reference_pass(member, root_name, processed);
                }
                self.reference_type(id);
            }
            _ => self.reference_type(id),
        }
    }

    fn standalone_pass(
        &mut self,
        id: NodeId,
        root_name: Option<&str>,
        processed: &mut HashSet<NodeId>,
    ) {
        if !processed.insert(id) {
            return;
        }
        let arena = self.arena;
        match &arena.node(id).kind {
            NodeKind::Array(Some(inner)) => {
                self.standalone_pass(*inner, root_name, processed);
            }
            NodeKind::Interface {
                params,
                super_types,
            } => {
                let node = arena.node(id);
                if node.standalone_name.as_deref() == root_name
                    || self.options.declare_externally_referenced
                {
                    self.object_typedef(id);
                    for super_type in super_types.clone() {
                        if let Some(name) = arena.name_of(super_type) {
                            self.tags.push(Tag::Text(format!("@extends {name}")));
                        }
                    }
                }
                let children: Vec<NodeId> = params
                    .iter()
                    .map(|param| param.node)
                    .chain(super_types.iter().copied())
                    .collect();
                for child in children {
                    self.standalone_pass(child, root_name, processed);
                }
            }
            NodeKind::Intersection(members) | NodeKind::Union(members) => {
                for member in members.clone() {
                    self.standalone_pass(member, root_name, processed);
                }
            }
            _ => {}
        }
    }

    /// `@typedef` + `@type` block for a named non-object node.
    fn reference_type(&mut self, id: NodeId) {
        let node = self.arena.node(id);
        let comment = node.comment.clone();
        let Some(name) = node.standalone_name.clone() else {
            return;
        };
        let rendered = self.type_of(id);
        self.tags.push(Tag::Delimiter);
        if let Some(comment) = &comment {
            for line in comment.lines() {
                self.tags.push(Tag::Text(line.to_string()));
            }
        }
        self.tags.push(Tag::Text(format!("@typedef {name}")));
        self.tags.push(Tag::Text(format!("@type {{{rendered}}}")));
    }

    /// `@typedef` + `@property` block for a named object node.
    fn object_typedef(&mut self, id: NodeId) {
        let node = self.arena.node(id);
        let Some(name) = node.standalone_name.clone() else {
            return;
        };
        let NodeKind::Interface { params, .. } = node.kind.clone() else {
            return;
        };

        self.tags.push(Tag::Delimiter);
        self.tags.push(Tag::Text(format!("@typedef {name}")));
        let rendered = self.type_of(id);
        let type_line = if rendered == name {
            "object".to_string()
        } else {
            rendered
        };
        self.tags.push(Tag::Text(format!("@type {{{type_line}}}")));

        let declared: Vec<InterfaceParam> = params
            .into_iter()
            .filter(|param| !param.is_index_signature())
            .collect();
        self.properties(&declared, &[]);
    }

    fn properties(&mut self, params: &[InterfaceParam], key_chain: &[String]) {
        for param in params {
            let mut chain = key_chain.to_vec();
            chain.push(param.key_name.clone());
            let key_path = chain.join(".");
            let rendered = self.type_of(param.node);
            let name = if param.required {
                key_path
            } else {
                format!("[{key_path}]")
            };

            let node = self.arena.node(param.node);
            let comment = node.comment.clone().unwrap_or_default();
            let nested_kind = node.kind.clone();
            let is_named = node.standalone_name.is_some();
            let line = format!("@property {{{rendered}}} {name} {comment}");
            self.tags.push(Tag::Text(line.trim_end().to_string()));

            // Anonymous nested objects are flattened with dotted key paths.
            if !is_named
                && let NodeKind::Interface { params: nested, .. } = nested_kind
            {
                let nested: Vec<InterfaceParam> = nested
                    .into_iter()
                    .filter(|nested| !nested.is_index_signature())
                    .collect();
                self.properties(&nested, &chain);
            }
        }
    }

    /// The rendered JSDoc type of a node; the case table mirrors the
    /// interface emitter but in `Array.<T>` / `Object.<string, T>` spelling.
    fn type_of(&self, id: NodeId) -> String {
        let node = self.arena.node(id);
        match &node.kind {
            NodeKind::Any => "any".to_string(),
            NodeKind::Boolean => "boolean".to_string(),
            NodeKind::Null => "null".to_string(),
            NodeKind::Number => "number".to_string(),
            NodeKind::Object => "object".to_string(),
            NodeKind::String => "string".to_string(),
            NodeKind::Custom(text) => text.clone(),
            NodeKind::Literal(value) => serde_json::to_string(value).unwrap_or_default(),
            NodeKind::Reference(target) => self
                .arena
                .name_of(*target)
                .map(str::to_string)
                .unwrap_or_else(|| "any".to_string()),
            NodeKind::Array(inner) => {
                let element = match inner {
                    Some(inner) => self.type_of(*inner),
                    None => "any".to_string(),
                };
                if element.ends_with('"') {
                    format!("Array.<({element})>")
                } else {
                    format!("Array.<{element}>")
                }
            }
            NodeKind::Tuple(members) => {
                let members: Vec<String> =
                    members.iter().map(|member| self.type_of(*member)).collect();
                format!("[{}]", members.join(", "))
            }
            NodeKind::Enum(members) | NodeKind::Union(members) => self.set_operation(members, "|"),
            NodeKind::Intersection(members) => self.set_operation(members, "&"),
            NodeKind::Interface { params, .. } => {
                let keyed = params.iter().find(|param| param.is_index_signature());
                match keyed {
                    Some(keyed)
                        if node.standalone_name.is_none() || params.len() == 1 =>
                    {
                        format!("Object.<string, {}>", self.type_of(keyed.node))
                    }
                    Some(_) => node.standalone_name.clone().unwrap_or_default(),
                    None => node
                        .standalone_name
                        .clone()
                        .unwrap_or_else(|| "object".to_string()),
                }
            }
        }
    }

    fn set_operation(&self, members: &[NodeId], separator: &str) -> String {
        let members: Vec<String> = members.iter().map(|member| self.type_of(*member)).collect();
        if members.len() == 1 {
            members.into_iter().next().unwrap_or_default()
        } else {
            format!("({})", members.join(separator))
        }
    }

    /// Split the tag list at delimiters and wrap each group in a comment
    /// block.
    fn assemble(self) -> String {
        let mut blocks = Vec::new();
        let mut current: Vec<String> = Vec::new();
        for tag in self.tags {
            match tag {
                Tag::Delimiter => {
                    if !current.is_empty() {
                        blocks.push(std::mem::take(&mut current));
                    }
                }
                Tag::Text(text) => current.push(text),
            }
        }
        if !current.is_empty() {
            blocks.push(current);
        }

        blocks
            .into_iter()
            .map(|block| {
                let mut out = String::from("/**\n");
                for line in block {
                    out.push_str(" * ");
                    out.push_str(&line);
                    out.push('\n');
                }
                out.push_str(" */");
                out
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
