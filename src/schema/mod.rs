//! Attribute schema: per-type attribute tables with parse/render rules.
//!
//! Each node type declares its attributes as [`AttrSpec`] rows. A row
//! names the model attribute, the HTML attribute it travels in, its
//! value kind and its default. `parse` is total - missing or malformed
//! source data falls back to the default, never errors. `render` is the
//! left-inverse of `parse` for every value `parse` can produce, which
//! is what makes the codec round-trip lossless.
//!
//! Dispatch is table-driven: adding a node type means adding one table,
//! not modifying control flow elsewhere.

mod button;
mod callout;
mod choices;
mod image;
mod quiz;
mod standard;
mod video;

pub use button::ButtonAttrs;
pub use callout::CalloutAttrs;
pub use choices::{Align, ButtonColor, ButtonRadius, ButtonSize, ButtonVariant};
pub use image::ImageAttrs;
pub use quiz::QuizAttrs;
pub use video::VideoAttrs;

use compact_str::CompactString;

use crate::attr::{AttrValue, Attrs, AttrsExt};
use crate::error::SchemaError;
use crate::node::NodeType;

// =============================================================================
// TagView
// =============================================================================

/// A detached view of one source element: tag name, merged attributes,
/// and inline text. The codec builds these from the parsed DOM so that
/// schema parse rules never touch parser types.
#[derive(Debug, Clone, Default)]
pub struct TagView {
    tag: CompactString,
    attrs: Vec<(String, String)>,
    text: String,
}

impl TagView {
    pub fn new(
        tag: impl Into<CompactString>,
        attrs: Vec<(String, String)>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            tag: tag.into(),
            attrs,
            text: text.into(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Merge in an attribute from a nested element (e.g. the `img`
    /// inside an image wrapper). First writer wins so wrapper-level
    /// attributes take precedence.
    pub fn absorb(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if self.get(&name).is_none() {
            self.attrs.push((name, value.into()));
        }
    }
}

// =============================================================================
// AttrSpec
// =============================================================================

/// How an attribute's value is parsed and rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrKind {
    /// Free-form string.
    Str,
    /// String that is `Null` when absent.
    NullableStr,
    /// `"true"` / `"false"`.
    Bool,
    /// Pixel dimension: decimal digits, optional `px` suffix in source.
    Pixels,
    /// `#rgb` / `#rrggbb` hex color.
    HexColor,
    /// Closed set of string values.
    Choice(&'static [&'static str]),
    /// The element's inline text (rendered by the codec, not as an
    /// attribute).
    InnerText,
    /// The `href` of the nested anchor (rendered by the codec).
    InnerHref,
    /// Heading level carried by the tag name (`h1`..`h6`).
    Level,
}

/// Default value for an attribute, spelled so tables stay `static`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrDefault {
    Null,
    Bool(bool),
    Str(&'static str),
}

/// One row of a node type's attribute table.
#[derive(Debug, Clone, Copy)]
pub struct AttrSpec {
    /// Model attribute name (the key in `BlockNode::attrs`).
    pub name: &'static str,
    /// HTML attribute the value travels in.
    pub html: &'static str,
    pub kind: AttrKind,
    pub default: AttrDefault,
    /// Required attributes must be non-null for the node to exist.
    pub required: bool,
}

impl AttrSpec {
    pub(crate) const fn new(
        name: &'static str,
        html: &'static str,
        kind: AttrKind,
        default: AttrDefault,
    ) -> Self {
        Self {
            name,
            html,
            kind,
            default,
            required: false,
        }
    }

    pub(crate) const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// The attribute's default value.
    pub fn default_value(&self) -> AttrValue {
        match self.default {
            AttrDefault::Null => AttrValue::Null,
            AttrDefault::Bool(b) => AttrValue::Bool(b),
            AttrDefault::Str(s) => AttrValue::str(s),
        }
    }

    /// Parse this attribute out of a source element. Total: `None`
    /// means "use the default", never an error.
    pub fn parse(&self, view: &TagView) -> Option<AttrValue> {
        match self.kind {
            AttrKind::Str | AttrKind::NullableStr => {
                view.get(self.html).map(AttrValue::from)
            }
            AttrKind::Bool => match view.get(self.html) {
                Some("true") => Some(AttrValue::Bool(true)),
                Some("false") => Some(AttrValue::Bool(false)),
                _ => None,
            },
            AttrKind::Pixels => view
                .get(self.html)
                .map(|v| v.trim().trim_end_matches("px"))
                .filter(|v| is_pixel_value(v))
                .map(AttrValue::from),
            AttrKind::HexColor => view
                .get(self.html)
                .filter(|v| is_hex_color(v))
                .map(AttrValue::from),
            AttrKind::Choice(values) => view
                .get(self.html)
                .filter(|v| values.contains(v))
                .map(AttrValue::from),
            AttrKind::InnerText => {
                let text = view.text().trim();
                (!text.is_empty()).then(|| AttrValue::from(text))
            }
            AttrKind::InnerHref => view.get("href").map(AttrValue::from),
            AttrKind::Level => {
                let tag = view.tag();
                let level = tag.strip_prefix('h')?;
                matches!(level, "1" | "2" | "3" | "4" | "5" | "6")
                    .then(|| AttrValue::from(level))
            }
        }
    }

    /// Contribute this attribute to the rendered wrapper markup.
    ///
    /// Only `data-*` attributes travel on the wrapper; everything else
    /// (media source attributes, anchor href/text, heading level) is
    /// carried by the visual markup the codec emits, where `parse`
    /// picks it back up.
    pub fn render(&self, value: &AttrValue, out: &mut Vec<(String, String)>) {
        if !self.html.starts_with("data-") {
            return;
        }
        if let Some(html) = value.to_html() {
            out.push((self.html.to_string(), html));
        }
    }
}

fn is_pixel_value(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

// =============================================================================
// Per-type dispatch
// =============================================================================

/// The attribute table for a node type.
pub fn attribute_spec(ty: NodeType) -> &'static [AttrSpec] {
    match ty {
        NodeType::Image => &image::SPEC,
        NodeType::Video => &video::SPEC,
        NodeType::Quiz => &quiz::SPEC,
        NodeType::Button => &button::SPEC,
        NodeType::Callout => &callout::SPEC,
        NodeType::Paragraph => &standard::PARAGRAPH_SPEC,
        NodeType::Heading => &standard::HEADING_SPEC,
    }
}

/// Full default attrs for a node type, in table order.
pub fn defaults(ty: NodeType) -> Attrs {
    attribute_spec(ty)
        .iter()
        .map(|spec| (CompactString::from(spec.name), spec.default_value()))
        .collect()
}

/// Parse all attributes of `ty` from a source element, falling back to
/// defaults. Never fails; required-attribute absence is caught later by
/// [`validate_required`].
pub fn parse_attrs(ty: NodeType, view: &TagView) -> Attrs {
    attribute_spec(ty)
        .iter()
        .map(|spec| {
            let value = spec.parse(view).unwrap_or_else(|| spec.default_value());
            (CompactString::from(spec.name), value)
        })
        .collect()
}

/// Render the wrapper-attribute contributions of all attrs of `ty`.
pub fn render_attrs(ty: NodeType, attrs: &Attrs, out: &mut Vec<(String, String)>) {
    for spec in attribute_spec(ty) {
        let value = attrs
            .get_attr(spec.name)
            .cloned()
            .unwrap_or_else(|| spec.default_value());
        spec.render(&value, out);
    }
}

/// Check that every required attribute is present and non-null.
pub fn validate_required(ty: NodeType, attrs: &Attrs) -> Result<(), SchemaError> {
    for spec in attribute_spec(ty) {
        if !spec.required {
            continue;
        }
        let missing = match attrs.get_attr(spec.name) {
            None | Some(AttrValue::Null) => true,
            Some(AttrValue::Str(s)) => s.is_empty(),
            Some(AttrValue::Bool(_)) => false,
        };
        if missing {
            return Err(SchemaError::MissingRequired {
                ty,
                name: spec.name,
            });
        }
    }
    Ok(())
}

/// Full validation: known keys only, required attributes, closed sets,
/// pixel and color syntax, and the button custom-color rule.
///
/// Keys outside the type's table are rejected: render iterates schema
/// rows only, so an unknown key would be stored yet never emitted and
/// silently lost on the next round trip.
///
/// A `custom` button color without a usable `customColor` is rejected
/// here rather than silently defaulted; the mutation protocol refuses
/// such an edit outright.
pub fn validate_attrs(ty: NodeType, attrs: &Attrs) -> Result<(), SchemaError> {
    validate_required(ty, attrs)?;

    let table = attribute_spec(ty);
    for (name, _) in attrs {
        if !table.iter().any(|spec| spec.name == name.as_str()) {
            return Err(SchemaError::UnknownAttribute {
                ty,
                name: name.to_string(),
            });
        }
    }

    for spec in table {
        let Some(value) = attrs.get_attr(spec.name) else {
            continue;
        };
        match (spec.kind, value) {
            (AttrKind::Choice(values), AttrValue::Str(s)) => {
                if !values.contains(&s.as_str()) {
                    return Err(SchemaError::InvalidEnumValue {
                        name: spec.name,
                        value: s.to_string(),
                    });
                }
            }
            (AttrKind::HexColor, AttrValue::Str(s)) => {
                if !is_hex_color(s) {
                    return Err(SchemaError::InvalidColor {
                        name: spec.name,
                        value: s.to_string(),
                    });
                }
            }
            (AttrKind::Pixels, AttrValue::Str(s)) => {
                if !is_pixel_value(s) {
                    return Err(SchemaError::InvalidPixels {
                        name: spec.name,
                        value: s.to_string(),
                    });
                }
            }
            _ => {}
        }
    }

    if ty == NodeType::Button
        && attrs.str_attr("color") == Some("custom")
        && !attrs.str_attr("customColor").is_some_and(is_hex_color)
    {
        return Err(SchemaError::CustomColorMissing);
    }

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
