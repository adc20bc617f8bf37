//! Selection as a tagged variant: text range or atomic node.
//!
//! An atomic node selection targets exactly one atomic-selectable node
//! by identity. Whether a node *may* be targeted is checked at the tree
//! boundary ([`DocumentTree::select_node`]), so a constructed
//! `AtomicNode` value is always consistent with the tree that issued it.
//!
//! [`DocumentTree::select_node`]: crate::node::DocumentTree::select_node

use crate::id::NodeId;

// =============================================================================
// Selection
// =============================================================================

/// Editor selection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// A range within text content; `anchor == head` is a caret.
    TextRange { anchor: usize, head: usize },
    /// A single atomic/callout node selected as a unit.
    AtomicNode { id: NodeId },
}

impl Selection {
    /// A collapsed text selection at `pos`.
    pub fn caret(pos: usize) -> Self {
        Self::TextRange {
            anchor: pos,
            head: pos,
        }
    }

    /// An atomic node selection on `id`.
    pub fn node(id: NodeId) -> Self {
        Self::AtomicNode { id }
    }

    /// Whether this is an atomic node selection.
    pub fn is_atomic(&self) -> bool {
        matches!(self, Self::AtomicNode { .. })
    }

    /// The selected node's id, for atomic selections.
    pub fn atomic_id(&self) -> Option<NodeId> {
        match self {
            Self::AtomicNode { id } => Some(*id),
            Self::TextRange { .. } => None,
        }
    }

    /// Whether this is a caret (empty text range).
    pub fn is_caret(&self) -> bool {
        matches!(self, Self::TextRange { anchor, head } if anchor == head)
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::caret(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_variants() {
        let caret = Selection::caret(3);
        assert!(caret.is_caret());
        assert!(!caret.is_atomic());
        assert_eq!(caret.atomic_id(), None);

        let range = Selection::TextRange { anchor: 1, head: 5 };
        assert!(!range.is_caret());

        let node = Selection::node(NodeId::from_raw(9));
        assert!(node.is_atomic());
        assert_eq!(node.atomic_id(), Some(NodeId::from_raw(9)));
    }
}
