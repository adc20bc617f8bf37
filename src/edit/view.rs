//! Node view controller - the editor-side lifecycle of one rendered
//! rich node.
//!
//! A [`NodeView`] never caches node attributes. It holds identity and a
//! small interaction state machine; canonical state lives in the tree
//! and flows one way, tree to DOM, through [`NodeView::project`].
//! Interaction handlers translate pointer input into [`set_attrs`]
//! calls and report whether the event was consumed.

use tracing::trace;

use crate::attr::{AttrValue, Attrs};
use crate::codec;
use crate::error::{DocResult, MutationError};
use crate::id::NodeId;
use crate::node::{DocumentTree, NodeType};
use crate::resolver::ResolverConfig;

use super::mutation::set_attrs_by_id;

/// Width floor during a resize drag, in pixels.
pub const MIN_RESIZE_WIDTH: u32 = 40;

// =============================================================================
// DOM projection
// =============================================================================

/// A rendered replacement for one node's DOM subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomPatch {
    pub node_id: NodeId,
    pub html: String,
}

/// Host-side DOM writer. The embedding layer implements this against
/// its actual view technology; tests implement it with a buffer.
pub trait DomSync {
    fn apply(&mut self, patch: &DomPatch);
}

// =============================================================================
// NodeView
// =============================================================================

/// In-flight resize gesture, anchored at the pointer-down sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeGesture {
    start_x: f64,
    start_width: u32,
    /// height/width at gesture start, kept to preserve aspect.
    aspect: Option<f64>,
}

/// Interaction state of one node view.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Selected,
    Resizing(ResizeGesture),
    EditingAttrs,
}

/// Controller for a single rich node's view.
#[derive(Debug)]
pub struct NodeView {
    node_id: NodeId,
    ty: NodeType,
    state: ViewState,
}

impl NodeView {
    pub fn new(node_id: NodeId, ty: NodeType) -> Self {
        Self {
            node_id,
            ty,
            state: ViewState::Idle,
        }
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn is_selected(&self) -> bool {
        !matches!(self.state, ViewState::Idle)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Pointer interaction
    // ─────────────────────────────────────────────────────────────────────────

    /// Handle pointer-down on the node body. Establishes the atomic
    /// selection and returns `true` when the event was consumed (the
    /// host must then stop propagation so the text editor underneath
    /// does not also react).
    pub fn pointer_down(&mut self, tree: &mut DocumentTree) -> DocResult<bool> {
        if !self.ty.is_atomic_selectable() {
            return Ok(false);
        }
        tree.select_node(self.node_id)?;
        self.state = ViewState::Selected;
        Ok(true)
    }

    /// External notification that the selection moved elsewhere.
    pub fn selection_changed(&mut self, tree: &DocumentTree) {
        if tree.selection().atomic_id() != Some(self.node_id) {
            self.state = ViewState::Idle;
        }
    }

    /// Deselect this node explicitly.
    pub fn deselect(&mut self, tree: &mut DocumentTree) {
        tree.deselect_node(self.node_id);
        self.state = ViewState::Idle;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Resize gesture
    // ─────────────────────────────────────────────────────────────────────────

    /// Begin a resize drag from a handle. The current rendered size is
    /// sampled by the host from layout, not from node attrs, so a node
    /// without explicit dimensions can still be resized.
    pub fn resize_start(
        &mut self,
        tree: &mut DocumentTree,
        pointer_x: f64,
        rendered_width: u32,
        rendered_height: Option<u32>,
    ) -> DocResult<()> {
        tree.select_node(self.node_id)?;
        let aspect = rendered_height
            .filter(|_| rendered_width > 0)
            .map(|h| f64::from(h) / f64::from(rendered_width));
        self.state = ViewState::Resizing(ResizeGesture {
            start_x: pointer_x,
            start_width: rendered_width,
            aspect,
        });
        Ok(())
    }

    /// Handle a pointer move during a resize drag. Writes the new
    /// dimensions through the mutation protocol and returns the
    /// re-rendered node for immediate visual feedback.
    pub fn resize_move(
        &mut self,
        tree: &mut DocumentTree,
        config: &ResolverConfig,
        pointer_x: f64,
    ) -> DocResult<Option<DomPatch>> {
        let ViewState::Resizing(gesture) = self.state else {
            return Ok(None);
        };

        let delta = pointer_x - gesture.start_x;
        let width = (f64::from(gesture.start_width) + delta)
            .round()
            .max(f64::from(MIN_RESIZE_WIDTH)) as u32;

        let mut patch: Attrs = vec![("width".into(), AttrValue::str(width.to_string()))];
        if let Some(aspect) = gesture.aspect {
            let height = (f64::from(width) * aspect).round() as u32;
            patch.push(("height".into(), AttrValue::str(height.to_string())));
        }
        set_attrs_by_id(tree, self.node_id, self.ty, &patch)?;
        trace!(node = %self.node_id, width, "resize step");
        Ok(self.project(tree, config))
    }

    /// End the drag, keeping the node selected.
    pub fn resize_end(&mut self) {
        if matches!(self.state, ViewState::Resizing(_)) {
            self.state = ViewState::Selected;
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Attribute editing
    // ─────────────────────────────────────────────────────────────────────────

    /// Open the attribute editing surface (toolbar/panel).
    pub fn begin_attr_edit(&mut self) {
        if matches!(self.state, ViewState::Selected) {
            self.state = ViewState::EditingAttrs;
        }
    }

    /// Commit an attribute patch from the editing surface. On success
    /// the view returns to `Selected` with a fresh projection; on
    /// failure the state and the tree are both unchanged.
    pub fn apply_attrs(
        &mut self,
        tree: &mut DocumentTree,
        config: &ResolverConfig,
        patch: &Attrs,
    ) -> DocResult<Option<DomPatch>> {
        set_attrs_by_id(tree, self.node_id, self.ty, patch)?;
        if matches!(self.state, ViewState::EditingAttrs) {
            self.state = ViewState::Selected;
        }
        Ok(self.project(tree, config))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Projection
    // ─────────────────────────────────────────────────────────────────────────

    /// Render this node's current canonical state to a DOM patch.
    /// `None` once the node has left the tree; the host removes the
    /// view in response.
    pub fn project(&self, tree: &DocumentTree, config: &ResolverConfig) -> Option<DomPatch> {
        let node = tree.find_by_id(self.node_id)?;
        let mut html = String::new();
        codec::render_node(node, config, &mut html);
        Some(DomPatch {
            node_id: self.node_id,
            html,
        })
    }

    /// Project and push into a [`DomSync`] in one step.
    pub fn sync(
        &self,
        tree: &DocumentTree,
        config: &ResolverConfig,
        dom: &mut dyn DomSync,
    ) -> DocResult<()> {
        let patch = self
            .project(tree, config)
            .ok_or(MutationError::StaleTarget)?;
        dom.apply(&patch);
        Ok(())
    }
}
