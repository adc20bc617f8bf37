//! Interactive editing layer: selection, the attribute mutation
//! protocol, and per-node view controllers.

mod mutation;
mod selection;
mod view;

pub use mutation::{apply_fetched, begin_fetch, set_attrs, set_attrs_by_id, FetchTicket};
pub use selection::Selection;
pub use view::{DomPatch, DomSync, NodeView, ResizeGesture, ViewState, MIN_RESIZE_WIDTH};
