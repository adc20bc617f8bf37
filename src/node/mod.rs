//! Node types for the block document tree.
//!
//! A document is an ordered sequence of [`BlockNode`]s. Rich widget
//! types (image, video, quiz, button) are *atomic*: they never carry
//! children and are selected and edited as a single unit. Callout is
//! the one rich type that contains nested blocks. Paragraphs and
//! headings carry [`Text`] children.

mod block;
mod document;
mod text;

pub use block::{BlockNode, Node};
pub use document::{DocumentTree, Stats};
pub use text::Text;

use smallvec::SmallVec;
use std::fmt;

/// Type alias for children collection.
pub type Children = SmallVec<[Node; 4]>;

// =============================================================================
// NodeType
// =============================================================================

/// The closed set of block node types.
///
/// Adding a node type means adding a variant here plus one schema table
/// row and one codec matcher arm; nothing else branches on types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Image,
    Video,
    Quiz,
    Button,
    Callout,
    Paragraph,
    Heading,
}

impl NodeType {
    /// All rich widget types, in schema table order.
    pub const RICH: [Self; 5] = [
        Self::Image,
        Self::Video,
        Self::Quiz,
        Self::Button,
        Self::Callout,
    ];

    /// The `data-type` marker emitted in the wrapper markup.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Quiz => "quiz",
            Self::Button => "button",
            Self::Callout => "callout",
            Self::Paragraph => "paragraph",
            Self::Heading => "heading",
        }
    }

    /// Map a `data-type` marker back to a node type.
    pub fn from_data_type(marker: &str) -> Option<Self> {
        match marker {
            "image" => Some(Self::Image),
            "video" => Some(Self::Video),
            "quiz" => Some(Self::Quiz),
            "button" => Some(Self::Button),
            "callout" => Some(Self::Callout),
            _ => None,
        }
    }

    /// Atomic nodes have no editable content and never carry children.
    pub fn is_atomic(&self) -> bool {
        matches!(self, Self::Image | Self::Video | Self::Quiz | Self::Button)
    }

    /// Types that an atomic node selection may target.
    pub fn is_atomic_selectable(&self) -> bool {
        self.is_atomic() || matches!(self, Self::Callout)
    }

    /// Whether this type may contain child nodes at all.
    pub fn accepts_children(&self) -> bool {
        !self.is_atomic()
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// NodePath
// =============================================================================

/// Position of a block node: child indices from the document root,
/// counting block children only.
///
/// Paths are cheap handles into the tree, not references. They go stale
/// whenever siblings are inserted or removed; anything that must survive
/// an edit holds a [`NodeId`](crate::id::NodeId) instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodePath(pub SmallVec<[usize; 4]>);

impl NodePath {
    /// Path of a top-level block.
    pub fn root(index: usize) -> Self {
        Self(SmallVec::from_slice(&[index]))
    }

    /// Extend this path with one more child index.
    pub fn child(&self, index: usize) -> Self {
        let mut inner = self.0.clone();
        inner.push(index);
        Self(inner)
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl From<&[usize]> for NodePath {
    fn from(indices: &[usize]) -> Self {
        Self(SmallVec::from_slice(indices))
    }
}
