//! Error types for blockdoc.
//!
//! There are no fatal errors in this crate: parse and render always
//! recover locally (defaults, placeholders), so the only fallible
//! surfaces are the mutation protocol and schema validation.

use thiserror::Error;

use crate::node::NodeType;

/// Errors returned by the attribute mutation protocol.
///
/// All variants leave the tree untouched; callers decide whether to
/// surface UI feedback.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MutationError {
    /// The target position no longer resolves to a node - the tree
    /// changed underneath the caller.
    #[error("no node at the target position")]
    StaleTarget,

    /// A node exists at the position but is not the type the caller
    /// expected.
    #[error("node type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: NodeType,
        found: NodeType,
    },

    /// The merged attributes failed schema validation.
    #[error("invalid attributes: {0}")]
    InvalidAttrs(#[from] SchemaError),

    /// The selection cannot target this node type as a unit.
    #[error("{0} nodes cannot hold an atomic node selection")]
    NotAtomicSelectable(NodeType),
}

/// Errors detected by the attribute schema validator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// A required attribute is absent or null.
    #[error("missing required attribute `{name}` on {ty} node")]
    MissingRequired { ty: NodeType, name: &'static str },

    /// An attribute key that is not in the node type's schema table.
    /// Unknown keys would be stored but never rendered, so they are
    /// rejected up front instead of vanishing on the next round trip.
    #[error("unknown attribute `{name}` on {ty} node")]
    UnknownAttribute { ty: NodeType, name: String },

    /// A pixel dimension that is not a bare decimal number.
    #[error("`{value}` is not a valid pixel value for `{name}`")]
    InvalidPixels { name: &'static str, value: String },

    /// A value outside an enumerated attribute's closed set.
    #[error("`{value}` is not a valid value for `{name}`")]
    InvalidEnumValue { name: &'static str, value: String },

    /// A color attribute that is not a `#rrggbb` hex string.
    #[error("`{value}` is not a valid hex color for `{name}`")]
    InvalidColor { name: &'static str, value: String },

    /// Button color is `custom` but no usable custom color value is set.
    #[error("button color is `custom` but no custom color value is set")]
    CustomColorMissing,
}

/// Result type alias for mutation operations.
pub type DocResult<T> = Result<T, MutationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MutationError::TypeMismatch {
            expected: NodeType::Image,
            found: NodeType::Video,
        };
        assert_eq!(
            err.to_string(),
            "node type mismatch: expected image, found video"
        );

        let err = MutationError::from(SchemaError::MissingRequired {
            ty: NodeType::Quiz,
            name: "quizId",
        });
        assert_eq!(
            err.to_string(),
            "invalid attributes: missing required attribute `quizId` on quiz node"
        );
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MutationError>();
        assert_send_sync::<SchemaError>();
    }
}
