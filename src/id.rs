//! Node identity for the document tree.
//!
//! Every block node gets a `NodeId` when it enters a [`DocumentTree`].
//! Identity is what survives edits: positions shift when siblings are
//! inserted or removed, but the id of a node never changes while it is
//! in the tree. Selection restoration and late async updates are both
//! keyed by id, never by position.
//!
//! [`DocumentTree`]: crate::node::DocumentTree

use std::fmt;

// =============================================================================
// NodeId
// =============================================================================

/// Stable identifier for a block node within one document tree.
///
/// Allocated monotonically by the owning tree. Ids are unique per tree
/// and are never reused, so a stale id simply fails to resolve instead
/// of aliasing another node.
///
/// # Memory Layout
///
/// - 8 bytes (u64), `Copy`, no heap allocation
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u64);

impl NodeId {
    /// Sentinel for nodes that have not been inserted into a tree yet.
    pub const UNASSIGNED: Self = Self(0);

    /// Create a NodeId from a raw u64 value.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw u64 representation.
    #[inline]
    pub const fn as_raw(&self) -> u64 {
        self.0
    }

    /// Whether this id has been assigned by a tree.
    #[inline]
    pub const fn is_assigned(&self) -> bool {
        self.0 != 0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::UNASSIGNED
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
