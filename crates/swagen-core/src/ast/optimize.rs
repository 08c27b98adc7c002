//! AST simplification: structurally-redundant wrappers are removed without
//! changing emitted semantics.

use std::collections::HashSet;

use super::{Arena, NodeId, NodeKind};

/// Optimize the subtree rooted at `id`, returning the (possibly replaced)
/// root. Traversal is cycle-safe per call; nodes already visited in this
/// pass are returned unchanged.
pub fn optimize(arena: &mut Arena, id: NodeId) -> NodeId {
    let mut processed = HashSet::new();
    optimize_node(arena, id, &mut processed)
}

fn optimize_node(arena: &mut Arena, id: NodeId, processed: &mut HashSet<NodeId>) -> NodeId {
    if !processed.insert(id) {
        return id;
    }

    match arena.node(id).kind.clone() {
        NodeKind::Array(Some(inner)) => {
            let inner = optimize_node(arena, inner, processed);
            arena.node_mut(id).kind = NodeKind::Array(Some(inner));
            id
        }
        NodeKind::Tuple(members) => {
            let members = members
                .into_iter()
                .map(|member| optimize_node(arena, member, processed))
                .collect();
            arena.node_mut(id).kind = NodeKind::Tuple(members);
            id
        }
        NodeKind::Interface {
            params,
            super_types,
        } => {
            let params = params
                .into_iter()
                .map(|mut param| {
                    param.node = optimize_node(arena, param.node, processed);
                    param
                })
                .collect();
            let super_types = super_types
                .into_iter()
                .map(|super_type| optimize_node(arena, super_type, processed))
                .collect();
            arena.node_mut(id).kind = NodeKind::Interface {
                params,
                super_types,
            };
            id
        }
        NodeKind::Union(members) => {
            let members = collapse_members(arena, members, processed);
            rewrap(arena, id, members, NodeKind::Union)
        }
        NodeKind::Intersection(members) => {
            let members = collapse_members(arena, members, processed);
            if members.len() == 1 {
                return rewrap(arena, id, members, NodeKind::Intersection);
            }
            if let Some(kind) = interface_from_intersection(arena, &members) {
                arena.node_mut(id).kind = kind;
                return id;
            }
            arena.node_mut(id).kind = NodeKind::Intersection(members);
            id
        }
        _ => id,
    }
}

/// Optimize set-operation members and drop structurally-equal duplicates.
fn collapse_members(
    arena: &mut Arena,
    members: Vec<NodeId>,
    processed: &mut HashSet<NodeId>,
) -> Vec<NodeId> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(members.len());
    for member in members {
        let member = optimize_node(arena, member, processed);
        if seen.insert(signature(arena, member)) {
            out.push(member);
        }
    }
    out
}

/// A single-member set operation collapses into its member. The wrapper's
/// name and comment carry over when it has them and the survivor does not;
/// a named wrapper keeps its identity (and registrations pointing at it) by
/// absorbing the member's kind instead.
fn rewrap(
    arena: &mut Arena,
    id: NodeId,
    members: Vec<NodeId>,
    kind: fn(Vec<NodeId>) -> NodeKind,
) -> NodeId {
    if members.len() != 1 {
        arena.node_mut(id).kind = kind(members);
        return id;
    }
    let survivor = members[0];
    if arena.node(id).standalone_name.is_some() {
        let inner = arena.node(survivor).clone();
        let wrapper = arena.node_mut(id);
        if inner.standalone_name.is_some() {
            // Both named: keep an alias to the member.
            wrapper.kind = NodeKind::Reference(survivor);
        } else {
            wrapper.kind = inner.kind;
            if wrapper.comment.is_none() {
                wrapper.comment = inner.comment;
            }
        }
        return id;
    }
    let comment = arena.node(id).comment.clone();
    if comment.is_some() && arena.node(survivor).comment.is_none() {
        arena.node_mut(survivor).comment = comment;
    }
    survivor
}

/// A named `allOf` whose members are all object shapes becomes an interface
/// extending its named members, merging any anonymous members' params.
fn interface_from_intersection(arena: &Arena, members: &[NodeId]) -> Option<NodeKind> {
    let mut params = Vec::new();
    let mut super_types = Vec::new();

    for &member in members {
        let target = arena.deref(member);
        let node = arena.node(target);
        match &node.kind {
            NodeKind::Interface {
                params: member_params,
                super_types: member_supers,
            } => {
                if node.standalone_name.is_some() {
                    super_types.push(member);
                } else {
                    params.extend(member_params.iter().cloned());
                    super_types.extend(member_supers.iter().copied());
                }
            }
            NodeKind::Object => {}
            _ => return None,
        }
    }

    if super_types.is_empty() {
        return None;
    }
    Some(NodeKind::Interface {
        params,
        super_types,
    })
}

/// Structural identity key used for member deduplication. Reference-carrying
/// kinds key on their target ids, so two distinct-but-equal anonymous shapes
/// are conservatively kept apart.
fn signature(arena: &Arena, id: NodeId) -> String {
    match &arena.node(id).kind {
        NodeKind::Any => "any".to_string(),
        NodeKind::Boolean => "boolean".to_string(),
        NodeKind::Null => "null".to_string(),
        NodeKind::Number => "number".to_string(),
        NodeKind::Object => "object".to_string(),
        NodeKind::String => "string".to_string(),
        NodeKind::Custom(text) => format!("custom:{text}"),
        NodeKind::Literal(value) => format!("literal:{value}"),
        NodeKind::Reference(target) => format!("node:{target}"),
        _ => format!("node:{}", arena.deref(id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::parse;
    use serde_json::json;

    #[test]
    fn single_member_union_unwraps() {
        let mut arena = Arena::new();
        let root = parse(&mut arena, &json!({"oneOf": [{"type": "string"}]}));
        let root = optimize(&mut arena, root);
        assert_eq!(arena.node(root).kind, NodeKind::String);
    }

    #[test]
    fn named_wrapper_absorbs_single_member() {
        let mut arena = Arena::new();
        let root = parse(
            &mut arena,
            &json!({"title": "Id", "oneOf": [{"type": "string"}]}),
        );
        let root = optimize(&mut arena, root);
        let node = arena.node(root);
        assert_eq!(node.standalone_name.as_deref(), Some("Id"));
        assert_eq!(node.kind, NodeKind::String);
    }

    #[test]
    fn duplicate_primitives_dedupe() {
        let mut arena = Arena::new();
        let root = parse(
            &mut arena,
            &json!({"oneOf": [{"type": "string"}, {"type": "string"}, {"type": "number"}]}),
        );
        let root = optimize(&mut arena, root);
        let NodeKind::Union(members) = &arena.node(root).kind else {
            panic!("expected union, got {:?}", arena.node(root).kind);
        };
        assert_eq!(members.len(), 2);
    }

    #[test]
    fn named_all_of_becomes_extends() {
        let mut arena = Arena::new();
        // Register the named base first, the way a definitions batch would.
        parse(
            &mut arena,
            &json!({
                "title": "Base",
                "type": "object",
                "additionalProperties": false,
                "properties": {"id": {"type": "string"}}
            }),
        );
        let root = parse(
            &mut arena,
            &json!({
                "title": "Derived",
                "allOf": [
                    {"title": "Base", "type": "object"},
                    {
                        "type": "object",
                        "additionalProperties": false,
                        "properties": {"name": {"type": "string"}}
                    }
                ]
            }),
        );
        let root = optimize(&mut arena, root);
        let NodeKind::Interface {
            params,
            super_types,
        } = &arena.node(root).kind
        else {
            panic!("expected interface, got {:?}", arena.node(root).kind);
        };
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].key_name, "name");
        assert_eq!(super_types.len(), 1);
        assert_eq!(arena.name_of(super_types[0]), Some("Base"));
    }
}
