//! Button node schema: label, target, and styling tokens.
//!
//! Label and target live on the nested anchor rather than as data
//! attributes; the styling tokens travel on the wrapper.

use crate::attr::{Attrs, AttrsExt};

use super::choices::{
    Align, ButtonColor, ButtonRadius, ButtonSize, ButtonVariant, ALIGN_VALUES, COLOR_VALUES,
    RADIUS_VALUES, SIZE_VALUES, VARIANT_VALUES,
};
use super::{AttrDefault, AttrKind, AttrSpec};

/// Attribute table for button nodes.
pub(super) static SPEC: [AttrSpec; 8] = [
    AttrSpec::new("text", "", AttrKind::InnerText, AttrDefault::Str("")),
    AttrSpec::new("url", "href", AttrKind::InnerHref, AttrDefault::Str("")),
    AttrSpec::new(
        "variant",
        "data-variant",
        AttrKind::Choice(VARIANT_VALUES),
        AttrDefault::Str("solid"),
    ),
    AttrSpec::new(
        "color",
        "data-color",
        AttrKind::Choice(COLOR_VALUES),
        AttrDefault::Str("primary"),
    ),
    AttrSpec::new(
        "customColor",
        "data-custom-color",
        AttrKind::HexColor,
        AttrDefault::Null,
    ),
    AttrSpec::new(
        "size",
        "data-size",
        AttrKind::Choice(SIZE_VALUES),
        AttrDefault::Str("md"),
    ),
    AttrSpec::new(
        "radius",
        "data-radius",
        AttrKind::Choice(RADIUS_VALUES),
        AttrDefault::Str("md"),
    ),
    AttrSpec::new(
        "align",
        "data-align",
        AttrKind::Choice(ALIGN_VALUES),
        AttrDefault::Str("center"),
    ),
];

// =============================================================================
// Typed view
// =============================================================================

/// Typed read of a button node's attrs.
#[derive(Debug, Clone, Default)]
pub struct ButtonAttrs {
    pub text: String,
    pub url: String,
    pub variant: ButtonVariant,
    pub color: ButtonColor,
    pub custom_color: Option<String>,
    pub size: ButtonSize,
    pub radius: ButtonRadius,
    pub align: Align,
}

impl ButtonAttrs {
    pub fn from_attrs(attrs: &Attrs) -> Self {
        Self {
            text: attrs.str_attr("text").unwrap_or_default().to_string(),
            url: attrs.str_attr("url").unwrap_or_default().to_string(),
            variant: attrs
                .str_attr("variant")
                .and_then(ButtonVariant::parse)
                .unwrap_or_default(),
            color: attrs
                .str_attr("color")
                .and_then(ButtonColor::parse)
                .unwrap_or_default(),
            custom_color: attrs.str_attr("customColor").map(str::to_string),
            size: attrs
                .str_attr("size")
                .and_then(ButtonSize::parse)
                .unwrap_or_default(),
            radius: attrs
                .str_attr("radius")
                .and_then(ButtonRadius::parse)
                .unwrap_or_default(),
            align: attrs
                .str_attr("align")
                .and_then(Align::parse)
                .unwrap_or_default(),
        }
    }

    /// CSS class list for the rendered anchor.
    pub fn class_list(&self) -> String {
        format!(
            "btn btn-{} btn-{} btn-{} radius-{}",
            self.variant.as_str(),
            self.color.as_str(),
            self.size.as_str(),
            self.radius.as_str(),
        )
    }
}
