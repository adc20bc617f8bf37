//! Prelude module for common imports.
//!
//! ```ignore
//! use blockdoc::prelude::*;
//! ```

// Node types
pub use crate::node::{BlockNode, Children, DocumentTree, Node, NodePath, NodeType, Stats, Text};

// Attributes
pub use crate::attr::{attrs_eq, AttrValue, Attrs, AttrsExt};

// Schema
pub use crate::schema::{
    attribute_spec, parse_attrs, render_attrs, validate_attrs, AttrKind, AttrSpec, ButtonAttrs,
    CalloutAttrs, ImageAttrs, QuizAttrs, TagView, VideoAttrs,
};

// Codec
pub use crate::codec::{parse_fragment, render_fragment, render_node, DroppedNode, ParseOutcome};

// Resolver
pub use crate::resolver::{
    build_embed_url, resolve_reference, EmbedOptions, ReferencePair, ResolverConfig,
};

// Editing
pub use crate::edit::{
    apply_fetched, begin_fetch, set_attrs, set_attrs_by_id, DomPatch, DomSync, FetchTicket,
    NodeView, Selection, ViewState,
};

// Host integration
pub use crate::collab::{MediaSink, NoopMediaSink, QuizDirectory, QuizMeta, StaticQuizDirectory};

// Identity
pub use crate::id::NodeId;

// Error
pub use crate::error::{DocResult, MutationError, SchemaError};
