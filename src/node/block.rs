//! Block node - the tagged tree node of the document model.

use compact_str::CompactString;
use smallvec::SmallVec;

use crate::attr::{attrs_eq, AttrValue, Attrs, AttrsExt};
use crate::id::NodeId;
use crate::schema;

use super::{Children, NodeType, Text};

// =============================================================================
// Node
// =============================================================================

/// Node in a document tree - either a block or inline text.
#[derive(Debug, Clone)]
pub enum Node {
    Block(Box<BlockNode>),
    Text(Text),
}

impl Node {
    #[inline]
    pub fn is_block(&self) -> bool {
        matches!(self, Node::Block(_))
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    /// Get as block reference.
    #[inline]
    pub fn as_block(&self) -> Option<&BlockNode> {
        match self {
            Node::Block(b) => Some(b),
            _ => None,
        }
    }

    /// Get as mutable block reference.
    #[inline]
    pub fn as_block_mut(&mut self) -> Option<&mut BlockNode> {
        match self {
            Node::Block(b) => Some(b),
            _ => None,
        }
    }

    /// Get as text reference.
    #[inline]
    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Node::Text(t) => Some(t),
            _ => None,
        }
    }
}

impl From<BlockNode> for Node {
    fn from(block: BlockNode) -> Self {
        Node::Block(Box::new(block))
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

// =============================================================================
// BlockNode
// =============================================================================

/// A block-level document node: type tag, typed attributes, children.
///
/// Invariants (upheld by the constructors, checked by [`validate`]):
/// - atomic types never have children
/// - callout always has at least one block child
///
/// [`validate`]: BlockNode::validate
#[derive(Debug, Clone)]
pub struct BlockNode {
    /// Identity within the owning tree (UNASSIGNED until inserted).
    pub id: NodeId,
    /// Node type tag.
    pub ty: NodeType,
    /// Typed attributes, keyed by schema attribute name.
    pub attrs: Attrs,
    /// Child nodes (empty for atomic types).
    pub children: Children,
}

impl BlockNode {
    /// Create a node of `ty` with schema defaults overlaid by `attrs`.
    pub fn new(ty: NodeType, attrs: Attrs) -> Self {
        let mut merged = schema::defaults(ty);
        merged.merge(&attrs);
        Self {
            id: NodeId::UNASSIGNED,
            ty,
            attrs: merged,
            children: SmallVec::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Type-specific constructors
    // ─────────────────────────────────────────────────────────────────────────

    /// Create an image node with the given source.
    pub fn image(src: impl Into<CompactString>) -> Self {
        let mut node = Self::new(NodeType::Image, Vec::new());
        node.attrs.set_attr("src", AttrValue::Str(src.into()));
        node
    }

    /// Create a video node from a resolved reference pair.
    pub fn video(asset_id: impl Into<CompactString>, account_id: Option<&str>) -> Self {
        let mut node = Self::new(NodeType::Video, Vec::new());
        node.attrs.set_attr("assetId", AttrValue::Str(asset_id.into()));
        if let Some(code) = account_id {
            node.attrs.set_attr("providerAccountId", AttrValue::str(code));
        }
        node
    }

    /// Create a quiz node referencing an external quiz entity.
    pub fn quiz(quiz_id: impl Into<CompactString>) -> Self {
        let mut node = Self::new(NodeType::Quiz, Vec::new());
        node.attrs.set_attr("quizId", AttrValue::Str(quiz_id.into()));
        node
    }

    /// Create a button node with label and target.
    pub fn button(text: impl Into<CompactString>, url: impl Into<CompactString>) -> Self {
        let mut node = Self::new(NodeType::Button, Vec::new());
        node.attrs.set_attr("text", AttrValue::Str(text.into()));
        node.attrs.set_attr("url", AttrValue::Str(url.into()));
        node
    }

    /// Create a callout. An empty paragraph is inserted when `children`
    /// has no blocks, keeping the non-empty invariant.
    pub fn callout(attrs: Attrs, children: impl IntoIterator<Item = BlockNode>) -> Self {
        let mut node = Self::new(NodeType::Callout, attrs);
        node.children = children.into_iter().map(Node::from).collect();
        if !node.children.iter().any(Node::is_block) {
            node.children.push(Node::from(Self::paragraph("")));
        }
        node
    }

    /// Create a paragraph with plain text content.
    pub fn paragraph(text: impl Into<String>) -> Self {
        let mut node = Self::new(NodeType::Paragraph, Vec::new());
        let text = text.into();
        if !text.is_empty() {
            node.children.push(Node::Text(Text::new(text)));
        }
        node
    }

    /// Create a heading of the given level (clamped to 1..=6).
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        let mut node = Self::new(NodeType::Heading, Vec::new());
        node.attrs
            .set_attr("level", AttrValue::str(level.clamp(1, 6).to_string()));
        let text = text.into();
        if !text.is_empty() {
            node.children.push(Node::Text(Text::new(text)));
        }
        node
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Attribute access
    // ─────────────────────────────────────────────────────────────────────────

    /// Get attribute value by name.
    pub fn get_attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get_attr(name)
    }

    /// Get attribute as string slice.
    pub fn str_attr(&self, name: &str) -> Option<&str> {
        self.attrs.str_attr(name)
    }

    /// Get attribute as bool.
    pub fn bool_attr(&self, name: &str) -> Option<bool> {
        self.attrs.bool_attr(name)
    }

    /// Set attribute value.
    ///
    /// This is a raw tree-layer write; interactive edits go through
    /// [`set_attrs`](crate::edit::set_attrs) so selection and
    /// validation guarantees hold.
    pub fn set_attr(&mut self, name: impl Into<CompactString>, value: AttrValue) {
        self.attrs.set_attr(name, value);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Structure helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Heading level, defaulting to 2 for malformed values.
    pub fn heading_level(&self) -> u8 {
        self.str_attr("level")
            .and_then(|s| s.parse::<u8>().ok())
            .map(|l| l.clamp(1, 6))
            .unwrap_or(2)
    }

    /// Iterate over block children.
    pub fn child_blocks(&self) -> impl Iterator<Item = &BlockNode> {
        self.children.iter().filter_map(Node::as_block)
    }

    /// Iterate over block children mutably.
    pub fn child_blocks_mut(&mut self) -> impl Iterator<Item = &mut BlockNode> {
        self.children.iter_mut().filter_map(Node::as_block_mut)
    }

    /// Block child at `index`, counting block children only.
    pub fn block_child(&self, index: usize) -> Option<&BlockNode> {
        self.child_blocks().nth(index)
    }

    /// Number of direct block children.
    pub fn block_count(&self) -> usize {
        self.children.iter().filter(|n| n.is_block()).count()
    }

    /// Concatenated text content of this subtree.
    pub fn text_content(&self) -> String {
        let mut buf = String::new();
        self.collect_text(&mut buf);
        buf
    }

    fn collect_text(&self, buf: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => buf.push_str(&t.content),
                Node::Block(b) => b.collect_text(buf),
            }
        }
    }

    /// Check the structural invariants of this subtree.
    pub fn validate(&self) -> bool {
        if self.ty.is_atomic() && !self.children.is_empty() {
            return false;
        }
        if self.ty == NodeType::Callout && !self.children.iter().any(Node::is_block) {
            return false;
        }
        self.child_blocks().all(BlockNode::validate)
    }

    /// Structural equality ignoring node identity.
    ///
    /// This is the equality of the round-trip law: parse assigns fresh
    /// ids, so `parse(render(node))` matches on type, attrs and
    /// children but never on id.
    pub fn content_eq(&self, other: &BlockNode) -> bool {
        self.ty == other.ty
            && attrs_eq(&self.attrs, &other.attrs)
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|(a, b)| match (a, b) {
                    (Node::Text(x), Node::Text(y)) => x == y,
                    (Node::Block(x), Node::Block(y)) => x.content_eq(y),
                    _ => false,
                })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_constructors_have_no_children() {
        assert!(BlockNode::image("/a.png").children.is_empty());
        assert!(BlockNode::quiz("q1").children.is_empty());
        assert!(BlockNode::button("Go", "/next").children.is_empty());
        assert!(BlockNode::video("XYZ123456789ABCD", Some("abc")).validate());
    }

    #[test]
    fn test_callout_never_empty() {
        let callout = BlockNode::callout(Vec::new(), []);
        assert_eq!(callout.block_count(), 1);
        assert!(callout.validate());

        let callout = BlockNode::callout(Vec::new(), [BlockNode::paragraph("note")]);
        assert_eq!(callout.block_count(), 1);
        assert_eq!(callout.text_content(), "note");
    }

    #[test]
    fn test_defaults_applied() {
        let image = BlockNode::image("/a.png");
        assert_eq!(image.str_attr("align"), Some("center"));
        assert_eq!(image.bool_attr("show_attribution"), Some(true));
        assert!(image.get_attr("source_url").is_some_and(AttrValue::is_null));
    }

    #[test]
    fn test_heading_level_clamped() {
        assert_eq!(BlockNode::heading(9, "t").heading_level(), 6);
        assert_eq!(BlockNode::heading(0, "t").heading_level(), 1);

        let mut h = BlockNode::heading(2, "t");
        h.set_attr("level", AttrValue::str("junk"));
        assert_eq!(h.heading_level(), 2);
    }

    #[test]
    fn test_content_eq_ignores_id() {
        let mut a = BlockNode::image("/a.png");
        let b = BlockNode::image("/a.png");
        a.id = NodeId::from_raw(7);
        assert!(a.content_eq(&b));

        let c = BlockNode::image("/other.png");
        assert!(!a.content_eq(&c));
    }
}
