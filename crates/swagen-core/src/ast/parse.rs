//! JSON Schema → AST parsing.

use std::collections::HashSet;

use serde_json::{Map, Value};

use super::{Arena, INDEX_SIGNATURE_KEY, InterfaceParam, Node, NodeId, NodeKind};
use crate::naming;

/// Parse a prepared (normalized, dereferenced) schema into the arena,
/// returning the root node id.
///
/// The arena's title lookup is consulted for every titled schema: the first
/// occurrence registers itself before its children are parsed, and any later
/// occurrence, including a cyclic `$ref` back into an ancestor, becomes a
/// `Reference` node pointing at the first. Sharing one arena across every
/// schema of a build is what lets a definition inlined into an operation
/// schema collapse back into a name instead of a duplicated declaration.
pub fn parse(arena: &mut Arena, schema: &Value) -> NodeId {
    let definitions = match schema.get("definitions") {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    };
    let mut parser = Parser { arena, definitions };
    parser.parse_node(schema)
}

struct Parser<'a> {
    arena: &'a mut Arena,
    definitions: Map<String, Value>,
}

impl Parser<'_> {
    fn parse_node(&mut self, schema: &Value) -> NodeId {
        let Value::Object(map) = schema else {
            // Boolean schemas and other scalars accept anything.
            return self.arena.alloc(Node::new(NodeKind::Any));
        };

        if let Some(Value::String(ref_path)) = map.get("$ref") {
            return self.parse_ref(ref_path);
        }

        let title = map
            .get("title")
            .and_then(Value::as_str)
            .map(naming::sanitize)
            .filter(|title| !title.is_empty());

        if let Some(title) = &title
            && let Some(existing) = self.arena.lookup_title(title)
        {
            return self.arena.alloc(Node::new(NodeKind::Reference(existing)));
        }

        let comment = map
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string);

        // Register before descending so self-references terminate.
        let id = self.arena.alloc(Node {
            kind: NodeKind::Any,
            standalone_name: title.clone(),
            comment,
        });
        if let Some(title) = &title {
            self.arena.register_title(title, id);
        }

        let kind = self.parse_kind(map);
        self.arena.node_mut(id).kind = kind;
        id
    }

    /// A `$ref` surviving dereferencing is either a preserved cycle into the
    /// definitions bag or an unresolvable (external) pointer; the latter
    /// degrades to `any`.
    fn parse_ref(&mut self, ref_path: &str) -> NodeId {
        if let Some(name) = ref_path.strip_prefix("#/definitions/") {
            if let Some(target) = self.definitions.get(name).cloned() {
                return self.parse_node(&target);
            }
        }
        self.arena.alloc(Node::new(NodeKind::Any))
    }

    fn parse_kind(&mut self, map: &Map<String, Value>) -> NodeKind {
        if let Some(Value::String(custom)) = map.get("tsType") {
            return NodeKind::Custom(custom.clone());
        }
        if let Some(Value::Array(members)) = map.get("allOf") {
            let members = members.iter().map(|m| self.parse_node(m)).collect();
            return NodeKind::Intersection(members);
        }
        if let Some(Value::Array(members)) = map.get("oneOf").or_else(|| map.get("anyOf")) {
            let members = members.iter().map(|m| self.parse_node(m)).collect();
            return NodeKind::Union(members);
        }
        if let Some(Value::Array(values)) = map.get("enum") {
            let members = values
                .iter()
                .map(|value| self.arena.alloc(Node::new(NodeKind::Literal(value.clone()))))
                .collect();
            return NodeKind::Enum(members);
        }

        match map.get("type") {
            Some(Value::String(name)) => self.parse_typed(name, map),
            Some(Value::Array(types)) => {
                let members = types
                    .iter()
                    .filter_map(Value::as_str)
                    .map(|name| {
                        let kind = self.parse_typed(name, map);
                        self.arena.alloc(Node::new(kind))
                    })
                    .collect();
                NodeKind::Union(members)
            }
            // Normalization coerces implicit containers, but schemas reached
            // only through inlining may still arrive shorthand.
            _ if map.contains_key("properties") => self.parse_interface(map),
            _ if map.contains_key("items") => self.parse_array(map),
            _ => NodeKind::Any,
        }
    }

    fn parse_typed(&mut self, name: &str, map: &Map<String, Value>) -> NodeKind {
        match name {
            "string" => NodeKind::String,
            "number" | "integer" => NodeKind::Number,
            "boolean" => NodeKind::Boolean,
            "null" => NodeKind::Null,
            "array" => self.parse_array(map),
            "object" => self.parse_interface(map),
            _ => NodeKind::Any,
        }
    }

    fn parse_array(&mut self, map: &Map<String, Value>) -> NodeKind {
        match map.get("items") {
            Some(Value::Array(items)) => {
                let members = items.iter().map(|item| self.parse_node(item)).collect();
                NodeKind::Tuple(members)
            }
            Some(items @ Value::Object(_)) => NodeKind::Array(Some(self.parse_node(items))),
            _ => NodeKind::Array(None),
        }
    }

    fn parse_interface(&mut self, map: &Map<String, Value>) -> NodeKind {
        let required: HashSet<&str> = match map.get("required") {
            Some(Value::Array(names)) => names.iter().filter_map(Value::as_str).collect(),
            _ => HashSet::new(),
        };

        let mut params = Vec::new();
        if let Some(Value::Object(properties)) = map.get("properties") {
            for (key, child) in properties {
                let node = self.parse_node(child);
                params.push(InterfaceParam {
                    key_name: key.clone(),
                    node,
                    required: required.contains(key.as_str()),
                });
            }
        }

        match map.get("additionalProperties") {
            Some(Value::Bool(false)) => {}
            Some(additional @ Value::Object(_)) => {
                let node = self.parse_node(additional);
                params.push(InterfaceParam {
                    key_name: INDEX_SIGNATURE_KEY.to_string(),
                    node,
                    required: false,
                });
            }
            // Unset and `true` both leave the object open.
            _ => {
                let node = self.arena.alloc(Node::new(NodeKind::Any));
                params.push(InterfaceParam {
                    key_name: INDEX_SIGNATURE_KEY.to_string(),
                    node,
                    required: false,
                });
            }
        }

        if params.is_empty() {
            return NodeKind::Object;
        }
        NodeKind::Interface {
            params,
            super_types: Vec::new(),
        }
    }
}
