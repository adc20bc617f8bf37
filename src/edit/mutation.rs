//! Atomic attribute mutation protocol.
//!
//! Every interactive attribute edit goes through [`set_attrs`]: the
//! target is re-resolved against the current tree, checked against the
//! caller's expected type, and the merged attribute set is validated
//! *before* anything is written. On any failure the tree is untouched.
//!
//! The write itself is a single in-place replacement of the node's
//! attrs. Identity never changes, so an atomic node selection survives
//! an arbitrary stream of edits without re-selection churn.

use tracing::debug;

use crate::attr::{Attrs, AttrsExt};
use crate::error::{DocResult, MutationError};
use crate::id::NodeId;
use crate::node::{DocumentTree, NodePath, NodeType};
use crate::schema;

/// Merge `patch` into the attrs of the node at `path`.
///
/// Fails without mutating when the path no longer resolves, the node is
/// not of the `expected` type, or the merged attrs fail validation.
/// Returns the id of the edited node.
pub fn set_attrs(
    tree: &mut DocumentTree,
    path: &NodePath,
    expected: NodeType,
    patch: &Attrs,
) -> DocResult<NodeId> {
    let node = tree.node_at_mut(path).ok_or(MutationError::StaleTarget)?;
    if node.ty != expected {
        return Err(MutationError::TypeMismatch {
            expected,
            found: node.ty,
        });
    }

    let mut merged = node.attrs.clone();
    merged.merge(patch);
    schema::validate_attrs(expected, &merged)?;

    node.attrs = merged;
    Ok(node.id)
}

/// Convenience: mutate by identity instead of position.
pub fn set_attrs_by_id(
    tree: &mut DocumentTree,
    id: NodeId,
    expected: NodeType,
    patch: &Attrs,
) -> DocResult<NodeId> {
    let path = tree.path_of(id).ok_or(MutationError::StaleTarget)?;
    set_attrs(tree, &path, expected, patch)
}

// =============================================================================
// Deferred writes
// =============================================================================

/// Claim ticket for an attribute write whose value arrives later (an
/// external metadata fetch, an upload completing).
///
/// The ticket pins the node by identity, not position, so the document
/// may be edited freely while the fetch is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub node_id: NodeId,
    pub expected: NodeType,
}

/// Open a deferred write against the node at `path`.
pub fn begin_fetch(
    tree: &DocumentTree,
    path: &NodePath,
    expected: NodeType,
) -> DocResult<FetchTicket> {
    let node = tree.node_at(path).ok_or(MutationError::StaleTarget)?;
    if node.ty != expected {
        return Err(MutationError::TypeMismatch {
            expected,
            found: node.ty,
        });
    }
    Ok(FetchTicket {
        node_id: node.id,
        expected,
    })
}

/// Apply a fetched value. Returns `false` when the node has left the
/// tree in the meantime; a late fetch against a deleted node is an
/// expected outcome, not an error.
pub fn apply_fetched(
    tree: &mut DocumentTree,
    ticket: FetchTicket,
    patch: &Attrs,
) -> DocResult<bool> {
    let Some(path) = tree.path_of(ticket.node_id) else {
        debug!(node = %ticket.node_id, "discarding fetch result for removed node");
        return Ok(false);
    };
    set_attrs(tree, &path, ticket.expected, patch)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::AttrValue;
    use crate::node::BlockNode;

    fn patch(pairs: &[(&str, AttrValue)]) -> Attrs {
        pairs.iter().map(|(k, v)| ((*k).into(), v.clone())).collect()
    }

    #[test]
    fn test_set_attrs_merges_and_validates() {
        let mut tree = DocumentTree::new();
        tree.push_block(BlockNode::image("/a.png"));

        let path = NodePath::root(0);
        set_attrs(
            &mut tree,
            &path,
            NodeType::Image,
            &patch(&[("width", AttrValue::str("320"))]),
        )
        .unwrap();

        let node = tree.node_at(&path).unwrap();
        assert_eq!(node.str_attr("width"), Some("320"));
        // Untouched attrs survive the merge
        assert_eq!(node.str_attr("src"), Some("/a.png"));
    }

    #[test]
    fn test_stale_path_is_rejected() {
        let mut tree = DocumentTree::new();
        tree.push_block(BlockNode::image("/a.png"));

        let err = set_attrs(
            &mut tree,
            &NodePath::root(3),
            NodeType::Image,
            &patch(&[("alt", AttrValue::str("x"))]),
        )
        .unwrap_err();
        assert_eq!(err, MutationError::StaleTarget);
    }

    #[test]
    fn test_type_mismatch_leaves_tree_untouched() {
        let mut tree = DocumentTree::new();
        tree.push_block(BlockNode::quiz("q-1"));

        let err = set_attrs(
            &mut tree,
            &NodePath::root(0),
            NodeType::Image,
            &patch(&[("alt", AttrValue::str("x"))]),
        )
        .unwrap_err();
        assert_eq!(
            err,
            MutationError::TypeMismatch {
                expected: NodeType::Image,
                found: NodeType::Quiz,
            }
        );
        assert!(tree.node_at(&NodePath::root(0)).unwrap().str_attr("alt").is_none());
    }

    #[test]
    fn test_invalid_merge_is_rejected_whole() {
        let mut tree = DocumentTree::new();
        tree.push_block(BlockNode::button("Go", "/next"));
        let path = NodePath::root(0);

        // custom color without a hex value: the whole patch is refused
        let err = set_attrs(
            &mut tree,
            &path,
            NodeType::Button,
            &patch(&[
                ("color", AttrValue::str("custom")),
                ("size", AttrValue::str("lg")),
            ]),
        )
        .unwrap_err();
        assert!(matches!(err, MutationError::InvalidAttrs(_)));

        let node = tree.node_at(&path).unwrap();
        assert_eq!(node.str_attr("color"), Some("primary"));
        assert_eq!(node.str_attr("size"), Some("md"));
    }

    #[test]
    fn test_misspelled_key_is_rejected_not_stored() {
        let mut tree = DocumentTree::new();
        tree.push_block(BlockNode::image("/a.png"));
        let path = NodePath::root(0);

        // A key outside the schema table would never render, so the
        // write is refused instead of silently losing data later.
        let err = set_attrs(
            &mut tree,
            &path,
            NodeType::Image,
            &patch(&[("widht", AttrValue::str("320"))]),
        )
        .unwrap_err();
        assert!(matches!(err, MutationError::InvalidAttrs(_)));
        assert!(!tree.node_at(&path).unwrap().attrs.has_attr("widht"));
    }

    #[test]
    fn test_garbage_pixel_value_never_reaches_markup() {
        let mut tree = DocumentTree::new();
        tree.push_block(BlockNode::image("/a.png"));
        let path = NodePath::root(0);

        let err = set_attrs(
            &mut tree,
            &path,
            NodeType::Image,
            &patch(&[("width", AttrValue::str("not-a-number"))]),
        )
        .unwrap_err();
        assert!(matches!(err, MutationError::InvalidAttrs(_)));

        let html = crate::codec::render_fragment(
            tree.blocks(),
            &crate::resolver::ResolverConfig::new(),
        );
        assert!(!html.contains("not-a-number"));
        assert!(!html.contains("width="));
    }

    #[test]
    fn test_selection_survives_mutation_stream() {
        let mut tree = DocumentTree::new();
        tree.push_block(BlockNode::paragraph("intro"));
        let id = tree.push_block(BlockNode::image("/a.png"));
        tree.select_node(id).unwrap();

        // A resize drag produces a dense stream of width updates.
        for width in (100..150).map(|w| w.to_string()) {
            set_attrs_by_id(
                &mut tree,
                id,
                NodeType::Image,
                &patch(&[("width", AttrValue::str(width))]),
            )
            .unwrap();
        }

        assert_eq!(tree.selection().atomic_id(), Some(id));
        assert_eq!(tree.find_by_id(id).unwrap().str_attr("width"), Some("149"));
    }

    #[test]
    fn test_late_fetch_applies_by_identity() {
        let mut tree = DocumentTree::new();
        let id = tree.push_block(BlockNode::video("XYZ123456789ABCD", Some("abc")));
        let ticket = begin_fetch(&tree, &NodePath::root(0), NodeType::Video).unwrap();
        assert_eq!(ticket.node_id, id);

        // The node moves before the fetch lands.
        tree.insert_block(0, BlockNode::paragraph("moved down"));
        let applied = apply_fetched(
            &mut tree,
            ticket,
            &patch(&[("title", AttrValue::str("Fetched title"))]),
        )
        .unwrap();
        assert!(applied);
        assert_eq!(
            tree.find_by_id(id).unwrap().str_attr("title"),
            Some("Fetched title")
        );
    }

    #[test]
    fn test_late_fetch_discarded_when_node_removed() {
        let mut tree = DocumentTree::new();
        tree.push_block(BlockNode::video("XYZ123456789ABCD", Some("abc")));
        let ticket = begin_fetch(&tree, &NodePath::root(0), NodeType::Video).unwrap();

        tree.remove_block(&NodePath::root(0)).unwrap();
        let applied = apply_fetched(
            &mut tree,
            ticket,
            &patch(&[("title", AttrValue::str("too late"))]),
        )
        .unwrap();
        assert!(!applied);
        assert!(tree.is_empty());
    }
}
