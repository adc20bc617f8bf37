//! Image node schema: source, dimensions, and attribution metadata.

use crate::attr::{Attrs, AttrsExt};

use super::choices::{Align, ALIGN_VALUES};
use super::{AttrDefault, AttrKind, AttrSpec};

/// Attribute table for image nodes.
pub(super) static SPEC: [AttrSpec; 10] = [
    AttrSpec::new("src", "src", AttrKind::Str, AttrDefault::Null).required(),
    AttrSpec::new("alt", "alt", AttrKind::Str, AttrDefault::Str("")),
    AttrSpec::new("width", "width", AttrKind::Pixels, AttrDefault::Null),
    AttrSpec::new("height", "height", AttrKind::Pixels, AttrDefault::Null),
    AttrSpec::new(
        "align",
        "data-align",
        AttrKind::Choice(ALIGN_VALUES),
        AttrDefault::Str("center"),
    ),
    AttrSpec::new(
        "source_url",
        "data-source-url",
        AttrKind::NullableStr,
        AttrDefault::Null,
    ),
    AttrSpec::new(
        "source_name",
        "data-source-name",
        AttrKind::NullableStr,
        AttrDefault::Null,
    ),
    AttrSpec::new(
        "license_note",
        "data-license-note",
        AttrKind::NullableStr,
        AttrDefault::Null,
    ),
    AttrSpec::new("year", "data-year", AttrKind::NullableStr, AttrDefault::Null),
    AttrSpec::new(
        "show_attribution",
        "data-show-attribution",
        AttrKind::Bool,
        AttrDefault::Bool(true),
    ),
];

// =============================================================================
// Typed view
// =============================================================================

/// Typed read of an image node's attrs, for render paths.
#[derive(Debug, Clone, Default)]
pub struct ImageAttrs {
    pub src: String,
    pub alt: String,
    pub width: Option<String>,
    pub height: Option<String>,
    pub align: Align,
    pub source_url: Option<String>,
    pub source_name: Option<String>,
    pub license_note: Option<String>,
    pub year: Option<String>,
    pub show_attribution: bool,
}

impl ImageAttrs {
    pub fn from_attrs(attrs: &Attrs) -> Self {
        Self {
            src: attrs.str_attr("src").unwrap_or_default().to_string(),
            alt: attrs.str_attr("alt").unwrap_or_default().to_string(),
            width: attrs.str_attr("width").map(str::to_string),
            height: attrs.str_attr("height").map(str::to_string),
            align: attrs
                .str_attr("align")
                .and_then(Align::parse)
                .unwrap_or_default(),
            source_url: attrs.str_attr("source_url").map(str::to_string),
            source_name: attrs.str_attr("source_name").map(str::to_string),
            license_note: attrs.str_attr("license_note").map(str::to_string),
            year: attrs.str_attr("year").map(str::to_string),
            show_attribution: attrs.bool_attr("show_attribution").unwrap_or(true),
        }
    }

    /// Whether an attribution caption should be emitted at all.
    pub fn wants_attribution(&self) -> bool {
        self.show_attribution && self.source_url.is_some()
    }
}
