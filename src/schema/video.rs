//! Video node schema: resolved reference pair plus display options.

use crate::attr::{Attrs, AttrsExt};
use crate::resolver::EmbedOptions;

use super::choices::{Align, ALIGN_VALUES};
use super::{AttrDefault, AttrKind, AttrSpec};

/// Attribute table for video nodes.
pub(super) static SPEC: [AttrSpec; 8] = [
    AttrSpec::new("assetId", "data-video-id", AttrKind::Str, AttrDefault::Null).required(),
    AttrSpec::new(
        "providerAccountId",
        "data-customer-code",
        AttrKind::NullableStr,
        AttrDefault::Null,
    ),
    AttrSpec::new(
        "themeColor",
        "data-primary-color",
        AttrKind::HexColor,
        AttrDefault::Null,
    ),
    AttrSpec::new(
        "align",
        "data-align",
        AttrKind::Choice(ALIGN_VALUES),
        AttrDefault::Str("center"),
    ),
    AttrSpec::new(
        "autoplay",
        "data-autoplay",
        AttrKind::Bool,
        AttrDefault::Bool(true),
    ),
    AttrSpec::new(
        "showDuration",
        "data-show-duration",
        AttrKind::Bool,
        AttrDefault::Bool(true),
    ),
    AttrSpec::new(
        "showBackground",
        "data-show-background",
        AttrKind::Bool,
        AttrDefault::Bool(true),
    ),
    AttrSpec::new("title", "data-title", AttrKind::Str, AttrDefault::Str("")),
];

// =============================================================================
// Typed view
// =============================================================================

/// Typed read of a video node's attrs.
#[derive(Debug, Clone, Default)]
pub struct VideoAttrs {
    pub asset_id: Option<String>,
    pub provider_account_id: Option<String>,
    pub theme_color: Option<String>,
    pub align: Align,
    pub autoplay: bool,
    pub show_duration: bool,
    pub show_background: bool,
    pub title: String,
}

impl VideoAttrs {
    pub fn from_attrs(attrs: &Attrs) -> Self {
        Self {
            asset_id: attrs.str_attr("assetId").map(str::to_string),
            provider_account_id: attrs.str_attr("providerAccountId").map(str::to_string),
            theme_color: attrs.str_attr("themeColor").map(str::to_string),
            align: attrs
                .str_attr("align")
                .and_then(Align::parse)
                .unwrap_or_default(),
            autoplay: attrs.bool_attr("autoplay").unwrap_or(true),
            show_duration: attrs.bool_attr("showDuration").unwrap_or(true),
            show_background: attrs.bool_attr("showBackground").unwrap_or(true),
            title: attrs.str_attr("title").unwrap_or_default().to_string(),
        }
    }

    /// Embed options for the resolver. Only options that deviate from
    /// their defaults are marked explicit, keeping embed URLs minimal.
    pub fn embed_options(&self) -> EmbedOptions {
        EmbedOptions {
            autoplay: (!self.autoplay).then_some(false),
            show_duration: (!self.show_duration).then_some(false),
            show_background: (!self.show_background).then_some(false),
        }
    }
}
