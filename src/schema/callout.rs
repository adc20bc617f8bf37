//! Callout node schema: colored container for nested blocks.

use crate::attr::{Attrs, AttrsExt};

use super::{AttrDefault, AttrKind, AttrSpec};

pub(super) const DEFAULT_BACKGROUND: &str = "#EFF6FF";
pub(super) const DEFAULT_BORDER: &str = "#BFDBFE";

/// Attribute table for callout nodes.
pub(super) static SPEC: [AttrSpec; 2] = [
    AttrSpec::new(
        "backgroundColor",
        "data-background-color",
        AttrKind::HexColor,
        AttrDefault::Str(DEFAULT_BACKGROUND),
    ),
    AttrSpec::new(
        "borderColor",
        "data-border-color",
        AttrKind::HexColor,
        AttrDefault::Str(DEFAULT_BORDER),
    ),
];

/// Typed read of a callout node's attrs.
#[derive(Debug, Clone)]
pub struct CalloutAttrs {
    pub background_color: String,
    pub border_color: String,
}

impl CalloutAttrs {
    pub fn from_attrs(attrs: &Attrs) -> Self {
        Self {
            background_color: attrs
                .str_attr("backgroundColor")
                .unwrap_or(DEFAULT_BACKGROUND)
                .to_string(),
            border_color: attrs
                .str_attr("borderColor")
                .unwrap_or(DEFAULT_BORDER)
                .to_string(),
        }
    }

    /// Inline style for the rendered wrapper.
    pub fn style(&self) -> String {
        format!(
            "background-color: {}; border-color: {};",
            self.background_color, self.border_color
        )
    }
}

impl Default for CalloutAttrs {
    fn default() -> Self {
        Self {
            background_color: DEFAULT_BACKGROUND.to_string(),
            border_color: DEFAULT_BORDER.to_string(),
        }
    }
}
