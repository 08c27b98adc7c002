//! AST → TypeScript type declarations.

use std::collections::HashSet;

use swagen_core::ast::{Arena, InterfaceParam, NodeId, NodeKind};
use swagen_core::naming;

/// Emission behavior switches.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// When false, only the root of each emitted tree gets a declaration;
    /// named descendants are referenced by name and are expected to be
    /// declared by their own batch entry.
    pub declare_externally_referenced: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            declare_externally_referenced: true,
        }
    }
}

/// Emit the named declarations for the tree rooted at `root`.
pub fn emit_declarations(arena: &Arena, root: NodeId, options: &EmitOptions) -> String {
    let mut declared = HashSet::new();
    let mut out = Vec::new();
    collect(arena, root, options, &mut declared, &mut out, true);
    out.join("\n")
}

fn collect(
    arena: &Arena,
    id: NodeId,
    options: &EmitOptions,
    declared: &mut HashSet<NodeId>,
    out: &mut Vec<String>,
    is_root: bool,
) {
    let id = arena.deref(id);
    if !declared.insert(id) {
        return;
    }
    let node = arena.node(id);
    if node.standalone_name.is_some() && (is_root || options.declare_externally_referenced) {
        out.push(declaration(arena, id));
    }
    if !options.declare_externally_referenced {
        return;
    }
    for child in children(&node.kind) {
        collect(arena, child, options, declared, out, false);
    }
}

fn children(kind: &NodeKind) -> Vec<NodeId> {
    match kind {
        NodeKind::Array(Some(inner)) => vec![*inner],
        NodeKind::Enum(members)
        | NodeKind::Intersection(members)
        | NodeKind::Tuple(members)
        | NodeKind::Union(members) => members.clone(),
        NodeKind::Interface {
            params,
            super_types,
        } => params
            .iter()
            .map(|param| param.node)
            .chain(super_types.iter().copied())
            .collect(),
        NodeKind::Reference(target) => vec![*target],
        _ => Vec::new(),
    }
}

/// Render one named declaration.
fn declaration(arena: &Arena, id: NodeId) -> String {
    let node = arena.node(id);
    let name = node.standalone_name.as_deref().unwrap_or_default();
    let mut out = String::new();
    push_doc_comment(&mut out, node.comment.as_deref(), "");

    match &node.kind {
        NodeKind::Interface {
            params,
            super_types,
        } => {
            out.push_str("export interface ");
            out.push_str(name);
            if !super_types.is_empty() {
                let names: Vec<&str> = super_types
                    .iter()
                    .filter_map(|super_type| arena.name_of(*super_type))
                    .collect();
                if !names.is_empty() {
                    out.push_str(" extends ");
                    out.push_str(&names.join(", "));
                }
            }
            out.push_str(" {\n");
            out.push_str(&interface_body(arena, params, "  "));
            out.push_str("}\n");
        }
        kind => {
            out.push_str("export type ");
            out.push_str(name);
            out.push_str(" = ");
            out.push_str(&kind_text(arena, kind));
            out.push_str(";\n");
        }
    }
    out
}

fn interface_body(arena: &Arena, params: &[InterfaceParam], indent: &str) -> String {
    let mut out = String::new();
    for param in params {
        let node = arena.node(arena.deref(param.node));
        push_doc_comment(&mut out, node.comment.as_deref(), indent);
        out.push_str(indent);
        if param.is_index_signature() {
            out.push_str(param.key_name.as_str());
        } else {
            out.push_str(&property_key(&param.key_name));
            if !param.required {
                out.push('?');
            }
        }
        out.push_str(": ");
        out.push_str(&type_text(arena, param.node));
        out.push_str(";\n");
    }
    out
}

/// Quote property keys that are not valid identifiers.
fn property_key(key: &str) -> String {
    if naming::sanitize(key) == key && !key.is_empty() {
        key.to_string()
    } else {
        serde_json::to_string(key).unwrap_or_else(|_| format!("\"{key}\""))
    }
}

fn push_doc_comment(out: &mut String, comment: Option<&str>, indent: &str) {
    let Some(comment) = comment else {
        return;
    };
    out.push_str(indent);
    out.push_str("/**\n");
    for line in comment.lines() {
        out.push_str(indent);
        out.push_str(" * ");
        out.push_str(&line.replace("*/", "*\\/"));
        out.push('\n');
    }
    out.push_str(indent);
    out.push_str(" */\n");
}

/// The inline type expression for a node: named nodes render as their name,
/// anonymous nodes render structurally.
pub fn type_text(arena: &Arena, id: NodeId) -> String {
    let id = arena.deref(id);
    let node = arena.node(id);
    if let Some(name) = &node.standalone_name {
        return name.clone();
    }
    kind_text(arena, &node.kind)
}

fn kind_text(arena: &Arena, kind: &NodeKind) -> String {
    match kind {
        NodeKind::Any => "any".to_string(),
        NodeKind::Boolean => "boolean".to_string(),
        NodeKind::Null => "null".to_string(),
        NodeKind::Number => "number".to_string(),
        NodeKind::Object => "object".to_string(),
        NodeKind::String => "string".to_string(),
        NodeKind::Custom(text) => text.clone(),
        NodeKind::Literal(value) => serde_json::to_string(value).unwrap_or_default(),
        NodeKind::Reference(target) => arena
            .name_of(*target)
            .map(str::to_string)
            .unwrap_or_else(|| "any".to_string()),
        NodeKind::Array(inner) => {
            let element = match inner {
                Some(inner) => type_text(arena, *inner),
                None => "any".to_string(),
            };
            if element.contains('|') || element.contains('&') {
                format!("({element})[]")
            } else {
                format!("{element}[]")
            }
        }
        NodeKind::Tuple(members) => {
            let members: Vec<String> = members
                .iter()
                .map(|member| type_text(arena, *member))
                .collect();
            format!("[{}]", members.join(", "))
        }
        NodeKind::Enum(members) | NodeKind::Union(members) => {
            let members: Vec<String> = members
                .iter()
                .map(|member| type_text(arena, *member))
                .collect();
            members.join(" | ")
        }
        NodeKind::Intersection(members) => {
            let members: Vec<String> = members
                .iter()
                .map(|member| type_text(arena, *member))
                .collect();
            members.join(" & ")
        }
        NodeKind::Interface {
            params,
            super_types,
        } => {
            let object = inline_object(arena, params);
            if super_types.is_empty() {
                object
            } else {
                let mut parts: Vec<String> = super_types
                    .iter()
                    .map(|super_type| type_text(arena, *super_type))
                    .collect();
                if params.is_empty() {
                    parts.join(" & ")
                } else {
                    parts.push(object);
                    parts.join(" & ")
                }
            }
        }
    }
}

fn inline_object(arena: &Arena, params: &[InterfaceParam]) -> String {
    if params.is_empty() {
        return "{}".to_string();
    }
    let fields: Vec<String> = params
        .iter()
        .map(|param| {
            if param.is_index_signature() {
                format!("{}: {}", param.key_name, type_text(arena, param.node))
            } else {
                let optional = if param.required { "" } else { "?" };
                format!(
                    "{}{}: {}",
                    property_key(&param.key_name),
                    optional,
                    type_text(arena, param.node)
                )
            }
        })
        .collect();
    format!("{{ {} }}", fields.join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use swagen_core::ast::{optimize, parse};
    use swagen_core::schema;

    fn emit(schema: serde_json::Value) -> String {
        let mut arena = Arena::new();
        let prepared = schema::prepare(schema, "test").unwrap();
        let root = parse(&mut arena, &prepared);
        let root = optimize(&mut arena, root);
        emit_declarations(
            &arena,
            root,
            &EmitOptions {
                declare_externally_referenced: false,
            },
        )
    }

    #[test]
    fn interface_declaration() {
        let out = emit(json!({
            "title": "Pet",
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "name": {"type": "string", "description": "Display name."},
                "age": {"type": "integer"}
            },
            "required": ["name"]
        }));
        assert!(out.contains("export interface Pet {"));
        assert!(out.contains("  name: string;"));
        assert!(out.contains("  age?: number;"));
        assert!(out.contains("* Display name."));
    }

    #[test]
    fn open_object_renders_index_signature() {
        let out = emit(json!({
            "title": "Bag",
            "type": "object",
            "properties": {"id": {"type": "string"}}
        }));
        assert!(out.contains("  [k: string]: any;"));
    }

    #[test]
    fn union_alias() {
        let out = emit(json!({
            "title": "Id",
            "oneOf": [{"type": "string"}, {"type": "number"}]
        }));
        assert_eq!(out, "export type Id = string | number;\n");
    }

    #[test]
    fn enum_alias_uses_literals() {
        let out = emit(json!({
            "title": "Status",
            "type": "string",
            "enum": ["available", "sold"]
        }));
        assert_eq!(out, "export type Status = \"available\" | \"sold\";\n");
    }

    #[test]
    fn array_of_union_is_parenthesized() {
        let out = emit(json!({
            "title": "Mixed",
            "type": "array",
            "items": {"oneOf": [{"type": "string"}, {"type": "number"}]}
        }));
        assert_eq!(out, "export type Mixed = (string | number)[];\n");
    }

    #[test]
    fn quoted_property_keys() {
        let out = emit(json!({
            "title": "Headers",
            "type": "object",
            "additionalProperties": false,
            "properties": {"x-trace-id": {"type": "string"}}
        }));
        assert!(out.contains("  \"x-trace-id\"?: string;"));
    }

    #[test]
    fn self_reference_emits_once() {
        let out = emit(json!({
            "title": "TreeNode",
            "type": "object",
            "additionalProperties": false,
            "properties": {"children": {
                "type": "array",
                "items": {"$ref": "#/definitions/TreeNode"}
            }},
            "definitions": {
                "TreeNode": {
                    "title": "TreeNode",
                    "type": "object",
                    "additionalProperties": false,
                    "properties": {"children": {
                        "type": "array",
                        "items": {"$ref": "#/definitions/TreeNode"}
                    }}
                }
            }
        }));
        assert_eq!(out.matches("export interface TreeNode").count(), 1);
        assert!(out.contains("  children?: TreeNode[];"));
    }

    #[test]
    fn extends_clause_from_all_of() {
        let mut arena = Arena::new();
        let base = schema::prepare(
            json!({
                "title": "Base",
                "type": "object",
                "additionalProperties": false,
                "properties": {"id": {"type": "string"}}
            }),
            "Base",
        )
        .unwrap();
        let base_root = parse(&mut arena, &base);
        let derived = schema::prepare(
            json!({
                "title": "Derived",
                "allOf": [
                    {"title": "Base", "type": "object"},
                    {
                        "type": "object",
                        "additionalProperties": false,
                        "properties": {"name": {"type": "string"}},
                        "required": ["name"]
                    }
                ]
            }),
            "Derived",
        )
        .unwrap();
        let derived_root = parse(&mut arena, &derived);
        let derived_root = optimize(&mut arena, derived_root);

        let options = EmitOptions {
            declare_externally_referenced: false,
        };
        let base_out = emit_declarations(&arena, base_root, &options);
        let derived_out = emit_declarations(&arena, derived_root, &options);
        assert!(base_out.contains("export interface Base {"));
        assert!(derived_out.contains("export interface Derived extends Base {"));
        assert!(derived_out.contains("  name: string;"));
    }
}
