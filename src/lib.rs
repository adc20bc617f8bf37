//! blockdoc - Block-level rich document model
//!
//! A tree of typed block nodes (paragraphs, headings, images, videos,
//! quizzes, buttons, callouts) with a lossless HTML codec, a
//! table-driven attribute schema, and an interactive editing layer.
//!
//! ## Modules
//! - `node`: BlockNode/DocumentTree/NodePath - the tree itself
//! - `schema`: per-type attribute tables with parse/render/validate
//! - `codec`: bidirectional HTML (canonical wrappers + legacy shapes)
//! - `resolver`: external video reference resolution and embed URLs
//! - `edit`: selection, the attribute mutation protocol, node views
//! - `collab`: host integration points (quiz directory, media sink)
//!
//! ## Usage
//!
//! ```
//! use blockdoc::prelude::*;
//!
//! let config = ResolverConfig::new();
//! let outcome = parse_fragment("<p>Hello</p><img src=\"/a.png\">", &config);
//! let mut tree = DocumentTree::from_blocks(outcome.nodes);
//!
//! let image = tree.find(|b| b.ty == NodeType::Image).map(|b| b.id);
//! if let Some(id) = image {
//!     tree.select_node(id).unwrap();
//! }
//!
//! let html = render_fragment(tree.blocks(), &config);
//! assert!(html.contains("data-type=\"image\""));
//! ```

// =============================================================================
// Core modules
// =============================================================================

/// Node types: BlockNode, DocumentTree, NodePath
pub mod node;

/// Attribute values and list operations
pub mod attr;

/// Per-type attribute schema tables
pub mod schema;

/// Bidirectional HTML codec
pub mod codec;

/// External video reference resolution
pub mod resolver;

/// Selection, mutation protocol, node view controllers
pub mod edit;

/// Host integration points
pub mod collab;

/// Node identity
pub mod id;

/// Error types
pub mod error;

/// Prelude for common imports
pub mod prelude;

// =============================================================================
// Re-exports
// =============================================================================

// Node types
pub use node::{BlockNode, Children, DocumentTree, Node, NodePath, NodeType, Stats, Text};

// Attribute types
pub use attr::{attrs_eq, AttrValue, Attrs, AttrsExt};

// Codec
pub use codec::{parse_fragment, render_fragment, DroppedNode, ParseOutcome};

// Resolver
pub use resolver::{build_embed_url, resolve_reference, EmbedOptions, ReferencePair, ResolverConfig};

// Editing
pub use edit::{set_attrs, DomPatch, NodeView, Selection, ViewState};

// Identity
pub use id::NodeId;

// Error types
pub use error::{DocResult, MutationError, SchemaError};
