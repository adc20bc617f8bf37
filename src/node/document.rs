//! Document tree - root container, traversal, and ownership.
//!
//! The tree exclusively owns its nodes and the current selection. Node
//! views and toolbars address nodes by [`NodePath`] or [`NodeId`] and
//! always re-read canonical attrs from here; nothing outside this module
//! holds a copy of node state.

use std::fmt;

use smallvec::SmallVec;
use tracing::debug;

use crate::collab::MediaSink;
use crate::edit::Selection;
use crate::error::{DocResult, MutationError};
use crate::id::NodeId;

use super::{BlockNode, Node, NodePath, NodeType};

// =============================================================================
// DocumentTree
// =============================================================================

/// Root container for a block document.
pub struct DocumentTree {
    /// Top-level block nodes in document order.
    blocks: SmallVec<[BlockNode; 8]>,
    /// Current selection state.
    selection: Selection,
    /// Next id to hand out; ids are never reused.
    next_id: u64,
    /// Fire-and-forget sink notified when image nodes enter the tree.
    media_sink: Option<Box<dyn MediaSink>>,
}

impl DocumentTree {
    /// Create an empty tree. The empty document collapses to a caret
    /// selection at position 0.
    pub fn new() -> Self {
        Self {
            blocks: SmallVec::new(),
            selection: Selection::caret(0),
            next_id: 1,
            media_sink: None,
        }
    }

    /// Create a tree from parsed blocks, assigning fresh ids.
    pub fn from_blocks(blocks: impl IntoIterator<Item = BlockNode>) -> Self {
        let mut tree = Self::new();
        for block in blocks {
            tree.push_block(block);
        }
        tree
    }

    /// Attach a media-registration sink.
    pub fn with_media_sink(mut self, sink: Box<dyn MediaSink>) -> Self {
        self.media_sink = Some(sink);
        self
    }

    /// Top-level blocks in document order.
    pub fn blocks(&self) -> &[BlockNode] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Insertion / removal
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert a block at a top-level index (clamped), assigning ids to
    /// the whole subtree. Returns the id of the inserted root.
    pub fn insert_block(&mut self, index: usize, mut block: BlockNode) -> NodeId {
        self.assign_ids(&mut block);
        self.register_media(&block);
        let index = index.min(self.blocks.len());
        let id = block.id;
        self.blocks.insert(index, block);
        id
    }

    /// Append a block at the end of the document.
    pub fn push_block(&mut self, block: BlockNode) -> NodeId {
        self.insert_block(self.blocks.len(), block)
    }

    /// Remove the block at `path`, returning it. Collapses the selection
    /// to a caret when the selected node leaves the tree.
    pub fn remove_block(&mut self, path: &NodePath) -> Option<BlockNode> {
        let removed = self.take_at(path)?;
        if let Some(id) = self.selection.atomic_id()
            && self.find_by_id(id).is_none()
        {
            self.selection = Selection::caret(0);
        }
        Some(removed)
    }

    fn take_at(&mut self, path: &NodePath) -> Option<BlockNode> {
        let (&leaf, parents) = path.indices().split_last()?;
        if parents.is_empty() {
            if leaf < self.blocks.len() {
                return Some(self.blocks.remove(leaf));
            }
            return None;
        }
        let parent = self.node_at_mut(&NodePath::from(parents))?;
        // Map the block-child index back to the raw child slot.
        let slot = parent
            .children
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_block())
            .map(|(i, _)| i)
            .nth(leaf)?;
        match parent.children.remove(slot) {
            Node::Block(b) => Some(*b),
            Node::Text(_) => None,
        }
    }

    fn assign_ids(&mut self, block: &mut BlockNode) {
        Self::assign_ids_inner(block, &mut self.next_id);
    }

    fn assign_ids_inner(block: &mut BlockNode, next_id: &mut u64) {
        block.id = NodeId::from_raw(*next_id);
        *next_id += 1;
        for child in block.child_blocks_mut() {
            Self::assign_ids_inner(child, next_id);
        }
    }

    fn register_media(&self, block: &BlockNode) {
        let Some(sink) = self.media_sink.as_deref() else {
            return;
        };
        if block.ty == NodeType::Image
            && let Some(src) = block.str_attr("src")
        {
            sink.register(src);
        }
        for child in block.child_blocks() {
            self.register_media(child);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lookup
    // ─────────────────────────────────────────────────────────────────────────

    /// Resolve a path to a node.
    pub fn node_at(&self, path: &NodePath) -> Option<&BlockNode> {
        let (&first, rest) = path.indices().split_first()?;
        let mut node = self.blocks.get(first)?;
        for &index in rest {
            node = node.block_child(index)?;
        }
        Some(node)
    }

    /// Resolve a path to a node, mutably.
    pub fn node_at_mut(&mut self, path: &NodePath) -> Option<&mut BlockNode> {
        let (&first, rest) = path.indices().split_first()?;
        let mut node = self.blocks.get_mut(first)?;
        for &index in rest {
            node = node.child_blocks_mut().nth(index)?;
        }
        Some(node)
    }

    /// Find a node by identity (depth-first).
    pub fn find_by_id(&self, id: NodeId) -> Option<&BlockNode> {
        self.iter().find(|b| b.id == id)
    }

    /// Current path of a node, by identity. `None` once the node has
    /// left the tree.
    pub fn path_of(&self, id: NodeId) -> Option<NodePath> {
        for (i, block) in self.blocks.iter().enumerate() {
            if let Some(path) = Self::path_in(block, id, NodePath::root(i)) {
                return Some(path);
            }
        }
        None
    }

    fn path_in(block: &BlockNode, id: NodeId, path: NodePath) -> Option<NodePath> {
        if block.id == id {
            return Some(path);
        }
        for (i, child) in block.child_blocks().enumerate() {
            if let Some(found) = Self::path_in(child, id, path.child(i)) {
                return Some(found);
            }
        }
        None
    }

    /// Depth-first iterator over all block nodes.
    pub fn iter(&self) -> BlockIterator<'_> {
        BlockIterator {
            stack: self.blocks.iter().rev().collect(),
        }
    }

    /// Find first block matching a predicate.
    pub fn find<F>(&self, predicate: F) -> Option<&BlockNode>
    where
        F: Fn(&BlockNode) -> bool,
    {
        self.iter().find(|b| predicate(b))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────────────────────

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Establish an atomic node selection on `id`.
    ///
    /// Fails when the node is gone or its type is not registered as
    /// atomic-selectable; the previous selection is kept in both cases.
    pub fn select_node(&mut self, id: NodeId) -> DocResult<()> {
        let node = self.find_by_id(id).ok_or(MutationError::StaleTarget)?;
        if !node.ty.is_atomic_selectable() {
            return Err(MutationError::NotAtomicSelectable(node.ty));
        }
        self.selection = Selection::node(id);
        Ok(())
    }

    /// Replace the selection with a text-range selection.
    pub fn select_range(&mut self, anchor: usize, head: usize) {
        self.selection = Selection::TextRange { anchor, head };
    }

    /// Collapse to a caret at position 0 (empty-document selection).
    pub fn collapse_selection(&mut self) {
        self.selection = Selection::caret(0);
    }

    /// Drop an atomic selection in response to an external selection
    /// change (user clicked elsewhere).
    pub fn deselect_node(&mut self, id: NodeId) {
        if self.selection.atomic_id() == Some(id) {
            debug!(node = %id, "atomic selection released");
            self.collapse_selection();
        }
    }

    /// Collect per-type statistics.
    pub fn stats(&self) -> Stats {
        let mut stats = Stats::default();
        for block in self.iter() {
            stats.count(block.ty);
        }
        stats
    }
}

impl Default for DocumentTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DocumentTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentTree")
            .field("blocks", &self.blocks)
            .field("selection", &self.selection)
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// BlockIterator - depth-first block traversal
// =============================================================================

/// Depth-first iterator over block nodes.
pub struct BlockIterator<'a> {
    stack: Vec<&'a BlockNode>,
}

impl<'a> Iterator for BlockIterator<'a> {
    type Item = &'a BlockNode;

    fn next(&mut self) -> Option<Self::Item> {
        let block = self.stack.pop()?;
        // Push children in reverse order so they're visited left-to-right
        for child in block.children.iter().rev() {
            if let Some(b) = child.as_block() {
                self.stack.push(b);
            }
        }
        Some(block)
    }
}

// =============================================================================
// Stats - document statistics
// =============================================================================

/// Per-type node counts collected from traversal.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stats {
    pub image_count: usize,
    pub video_count: usize,
    pub quiz_count: usize,
    pub button_count: usize,
    pub callout_count: usize,
    pub paragraph_count: usize,
    pub heading_count: usize,
}

impl Stats {
    fn count(&mut self, ty: NodeType) {
        match ty {
            NodeType::Image => self.image_count += 1,
            NodeType::Video => self.video_count += 1,
            NodeType::Quiz => self.quiz_count += 1,
            NodeType::Button => self.button_count += 1,
            NodeType::Callout => self.callout_count += 1,
            NodeType::Paragraph => self.paragraph_count += 1,
            NodeType::Heading => self.heading_count += 1,
        }
    }

    /// Total rich widget nodes (everything except paragraphs/headings).
    pub fn widget_count(&self) -> usize {
        self.image_count + self.video_count + self.quiz_count + self.button_count + self.callout_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_insert_assigns_ids_depth_first() {
        let mut tree = DocumentTree::new();
        let callout = BlockNode::callout(Vec::new(), [BlockNode::paragraph("a")]);
        let id = tree.push_block(callout);

        let root = tree.node_at(&NodePath::root(0)).unwrap();
        assert_eq!(root.id, id);
        assert!(root.block_child(0).unwrap().id.is_assigned());
        assert_ne!(root.block_child(0).unwrap().id, id);
    }

    #[test]
    fn test_path_lookup() {
        let mut tree = DocumentTree::new();
        tree.push_block(BlockNode::paragraph("first"));
        tree.push_block(BlockNode::callout(
            Vec::new(),
            [BlockNode::paragraph("inner"), BlockNode::image("/a.png")],
        ));

        let image = tree.node_at(&NodePath::from(&[1usize, 1][..])).unwrap();
        assert_eq!(image.ty, NodeType::Image);
        assert_eq!(tree.path_of(image.id).unwrap().indices(), &[1, 1]);

        assert!(tree.node_at(&NodePath::root(5)).is_none());
    }

    #[test]
    fn test_selection_rules() {
        let mut tree = DocumentTree::new();
        let para = tree.push_block(BlockNode::paragraph("text"));
        let image = tree.push_block(BlockNode::image("/a.png"));

        assert!(tree.select_node(image).is_ok());
        assert_eq!(tree.selection().atomic_id(), Some(image));

        let err = tree.select_node(para).unwrap_err();
        assert_eq!(err, MutationError::NotAtomicSelectable(NodeType::Paragraph));
        // Failed select keeps the previous selection
        assert_eq!(tree.selection().atomic_id(), Some(image));

        let gone = NodeId::from_raw(9999);
        assert_eq!(tree.select_node(gone), Err(MutationError::StaleTarget));
    }

    #[test]
    fn test_remove_collapses_selection() {
        let mut tree = DocumentTree::new();
        let id = tree.push_block(BlockNode::quiz("q-7"));
        tree.select_node(id).unwrap();

        let removed = tree.remove_block(&NodePath::root(0)).unwrap();
        assert_eq!(removed.id, id);
        assert_eq!(*tree.selection(), Selection::caret(0));
        assert!(tree.find_by_id(id).is_none());
    }

    #[test]
    fn test_media_sink_notified_on_insert() {
        struct Recorder(Rc<RefCell<Vec<String>>>);
        impl MediaSink for Recorder {
            fn register(&self, src: &str) {
                self.0.borrow_mut().push(src.to_string());
            }
        }

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut tree = DocumentTree::new().with_media_sink(Box::new(Recorder(seen.clone())));
        tree.push_block(BlockNode::paragraph("no media"));
        tree.push_block(BlockNode::image("/cover.png"));
        tree.push_block(BlockNode::callout(
            Vec::new(),
            [BlockNode::image("/inner.png")],
        ));

        assert_eq!(*seen.borrow(), vec!["/cover.png", "/inner.png"]);
    }

    #[test]
    fn test_stats() {
        let mut tree = DocumentTree::new();
        tree.push_block(BlockNode::heading(2, "Title"));
        tree.push_block(BlockNode::image("/a.png"));
        tree.push_block(BlockNode::callout(Vec::new(), [BlockNode::paragraph("x")]));

        let stats = tree.stats();
        assert_eq!(stats.heading_count, 1);
        assert_eq!(stats.image_count, 1);
        assert_eq!(stats.callout_count, 1);
        assert_eq!(stats.paragraph_count, 1);
        assert_eq!(stats.widget_count(), 2);
    }
}
