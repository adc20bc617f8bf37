//! Standard text block schemas: paragraph and heading.
//!
//! Paragraphs carry no attributes. Headings carry their level in the
//! tag name, so the table has one row that parses `h1`..`h6` and
//! contributes nothing to the wrapper attributes.

use super::{AttrDefault, AttrKind, AttrSpec};

/// Attribute table for paragraph nodes (intentionally empty).
pub(super) static PARAGRAPH_SPEC: [AttrSpec; 0] = [];

/// Attribute table for heading nodes.
pub(super) static HEADING_SPEC: [AttrSpec; 1] = [AttrSpec::new(
    "level",
    "",
    AttrKind::Level,
    AttrDefault::Str("2"),
)];
