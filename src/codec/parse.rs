//! Parsing stored HTML fragments back into block nodes.
//!
//! Each rich type's wrapper matcher runs first (`data-type` marker),
//! then the legacy matchers for bare `<img>`/`<video>` tags, then the
//! standard paragraph/heading path. A node whose required attribute
//! cannot be resolved is dropped with a diagnostic, never inserted as a
//! broken node.

use ego_tree::NodeRef;
use scraper::{ElementRef, Html};
use tracing::warn;

use crate::node::{BlockNode, NodeType};
use crate::resolver::{resolve_reference, ResolverConfig};
use crate::schema::{self, TagView};

// =============================================================================
// ParseOutcome
// =============================================================================

/// A node that could not be materialized during parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedNode {
    pub ty: NodeType,
    pub reason: String,
}

/// Result of parsing a fragment: the materialized nodes plus a record
/// of everything that had to be dropped.
#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub nodes: Vec<BlockNode>,
    pub dropped: Vec<DroppedNode>,
}

impl ParseOutcome {
    pub fn into_nodes(self) -> Vec<BlockNode> {
        self.nodes
    }
}

// =============================================================================
// Entry point
// =============================================================================

/// Parse an HTML fragment into block nodes.
pub fn parse_fragment(html: &str, config: &ResolverConfig) -> ParseOutcome {
    let fragment = Html::parse_fragment(html);
    let mut outcome = ParseOutcome::default();
    for child in fragment.root_element().children() {
        parse_dom_node(child, config, &mut outcome);
    }
    outcome
}

fn parse_dom_node(
    node: NodeRef<'_, scraper::Node>,
    config: &ResolverConfig,
    outcome: &mut ParseOutcome,
) {
    match node.value() {
        scraper::Node::Text(text) => {
            let content = text.trim();
            if !content.is_empty() {
                outcome.nodes.push(BlockNode::paragraph(content));
            }
        }
        scraper::Node::Element(_) => {
            if let Some(el) = ElementRef::wrap(node) {
                parse_element(el, config, outcome);
            }
        }
        _ => {}
    }
}

fn parse_element(el: ElementRef<'_>, config: &ResolverConfig, outcome: &mut ParseOutcome) {
    // Wrapper markup with a data-type marker wins over everything.
    if let Some(ty) = el
        .value()
        .attr("data-type")
        .and_then(NodeType::from_data_type)
    {
        match parse_rich(ty, el, config, outcome) {
            Ok(node) => outcome.nodes.push(node),
            Err(reason) => drop_node(ty, reason, outcome),
        }
        return;
    }

    match el.value().name() {
        // Legacy tolerance: bare tags without our wrapper markup.
        "img" => match parse_typed(NodeType::Image, el) {
            Ok(node) => outcome.nodes.push(node),
            Err(reason) => drop_node(NodeType::Image, reason, outcome),
        },
        "video" => match legacy_video(el) {
            Ok(node) => outcome.nodes.push(node),
            Err(reason) => drop_node(NodeType::Video, reason, outcome),
        },
        "p" => {
            let text = el.text().collect::<String>();
            outcome.nodes.push(BlockNode::paragraph(text));
        }
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let view = tag_view(el);
            let attrs = schema::parse_attrs(NodeType::Heading, &view);
            let mut node = BlockNode::heading(2, el.text().collect::<String>());
            node.attrs = attrs;
            outcome.nodes.push(node);
        }
        // Unknown containers: look inside; hand-authored content often
        // wraps real blocks in stray divs.
        _ => {
            let before = outcome.nodes.len();
            for child in el.children() {
                parse_dom_node(child, config, outcome);
            }
            if outcome.nodes.len() == before {
                let text = el.text().collect::<String>();
                if !text.trim().is_empty() {
                    outcome.nodes.push(BlockNode::paragraph(text.trim()));
                }
            }
        }
    }
}

fn drop_node(ty: NodeType, reason: String, outcome: &mut ParseOutcome) {
    warn!(node_type = %ty, %reason, "dropping unparseable node");
    outcome.dropped.push(DroppedNode { ty, reason });
}

// =============================================================================
// Rich node matchers
// =============================================================================

fn parse_rich(
    ty: NodeType,
    el: ElementRef<'_>,
    config: &ResolverConfig,
    outcome: &mut ParseOutcome,
) -> Result<BlockNode, String> {
    if ty == NodeType::Callout {
        return parse_callout(el, config, outcome);
    }
    if ty == NodeType::Video {
        return parse_video(el);
    }
    parse_typed(ty, el)
}

/// Schema-driven parse for a single element.
fn parse_typed(ty: NodeType, el: ElementRef<'_>) -> Result<BlockNode, String> {
    let view = tag_view(el);
    let attrs = schema::parse_attrs(ty, &view);
    schema::validate_required(ty, &attrs).map_err(|e| e.to_string())?;
    let mut node = BlockNode::new(ty, Vec::new());
    node.attrs = attrs;
    Ok(node)
}

fn parse_video(el: ElementRef<'_>) -> Result<BlockNode, String> {
    let view = tag_view(el);
    let mut attrs = schema::parse_attrs(NodeType::Video, &view);

    // Wrapper without data-video-id: fall back to resolving the iframe
    // src, tolerating content produced by other tools.
    if attrs_missing(&attrs, "assetId")
        && let Some(src) = first_descendant_attr(el, "iframe", "src")
    {
        let pair = resolve_reference(&src);
        fill_reference(&mut attrs, &pair);
    }

    schema::validate_required(NodeType::Video, &attrs).map_err(|e| e.to_string())?;
    let mut node = BlockNode::new(NodeType::Video, Vec::new());
    node.attrs = attrs;
    Ok(node)
}

fn parse_callout(
    el: ElementRef<'_>,
    config: &ResolverConfig,
    outcome: &mut ParseOutcome,
) -> Result<BlockNode, String> {
    let view = tag_view(el);
    let attrs = schema::parse_attrs(NodeType::Callout, &view);

    let mut inner = ParseOutcome::default();
    for child in el.children() {
        parse_dom_node(child, config, &mut inner);
    }
    // Drops inside the callout surface on the fragment outcome.
    outcome.dropped.append(&mut inner.dropped);

    Ok(BlockNode::callout(attrs, inner.nodes))
}

/// Legacy `<video src=…>` / `<video><source src=…></video>` support.
fn legacy_video(el: ElementRef<'_>) -> Result<BlockNode, String> {
    let src = el
        .value()
        .attr("src")
        .map(str::to_string)
        .or_else(|| first_descendant_attr(el, "source", "src"))
        .ok_or_else(|| "video tag has no source".to_string())?;

    let pair = resolve_reference(&src);
    let Some(asset) = pair.asset_id.as_deref() else {
        return Err(format!("unresolvable video reference: {src}"));
    };
    Ok(BlockNode::video(asset, pair.account_id.as_deref()))
}

// =============================================================================
// DOM helpers
// =============================================================================

/// Build the schema's detached element view, merging in the attributes
/// of nested media/anchor elements so per-attribute parse rules can
/// stay oblivious to wrapper structure.
fn tag_view(el: ElementRef<'_>) -> TagView {
    let attrs = el
        .value()
        .attrs()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let mut view = TagView::new(el.value().name(), attrs, el.text().collect::<String>());

    for descendant in el.descendants().skip(1) {
        let Some(inner) = ElementRef::wrap(descendant) else {
            continue;
        };
        match inner.value().name() {
            "img" => {
                for name in ["src", "alt", "width", "height"] {
                    if let Some(value) = inner.value().attr(name) {
                        view.absorb(name, value);
                    }
                }
            }
            "a" => {
                if let Some(href) = inner.value().attr("href") {
                    view.absorb("href", href);
                }
            }
            _ => {}
        }
    }
    view
}

fn first_descendant_attr(el: ElementRef<'_>, tag: &str, attr: &str) -> Option<String> {
    el.descendants().skip(1).find_map(|d| {
        ElementRef::wrap(d)
            .filter(|e| e.value().name() == tag)
            .and_then(|e| e.value().attr(attr))
            .map(str::to_string)
    })
}

fn attrs_missing(attrs: &crate::attr::Attrs, name: &str) -> bool {
    use crate::attr::AttrsExt;
    attrs.str_attr(name).is_none_or(str::is_empty)
}

fn fill_reference(attrs: &mut crate::attr::Attrs, pair: &crate::resolver::ReferencePair) {
    use crate::attr::{AttrValue, AttrsExt};
    if let Some(asset) = &pair.asset_id {
        attrs.set_attr("assetId", AttrValue::Str(asset.clone()));
    }
    if attrs_missing(attrs, "providerAccountId")
        && let Some(account) = &pair.account_id
    {
        attrs.set_attr("providerAccountId", AttrValue::Str(account.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> ParseOutcome {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        parse_fragment(html, &ResolverConfig::new())
    }

    #[test]
    fn test_parse_standard_blocks() {
        let outcome = parse("<h2>Title</h2><p>Body text</p>");
        assert_eq!(outcome.nodes.len(), 2);
        assert_eq!(outcome.nodes[0].ty, NodeType::Heading);
        assert_eq!(outcome.nodes[0].heading_level(), 2);
        assert_eq!(outcome.nodes[1].ty, NodeType::Paragraph);
        assert_eq!(outcome.nodes[1].text_content(), "Body text");
        assert!(outcome.dropped.is_empty());
    }

    #[test]
    fn test_legacy_bare_img() {
        let outcome = parse("<img src=\"/photo.jpg\" alt=\"A photo\">");
        assert_eq!(outcome.nodes.len(), 1);
        let node = &outcome.nodes[0];
        assert_eq!(node.ty, NodeType::Image);
        assert_eq!(node.str_attr("src"), Some("/photo.jpg"));
        assert_eq!(node.str_attr("alt"), Some("A photo"));
        // Attribution attrs default
        assert_eq!(node.bool_attr("show_attribution"), Some(true));
        assert!(node.get_attr("source_url").unwrap().is_null());
    }

    #[test]
    fn test_legacy_video_manifest_url() {
        let outcome = parse(
            "<video src=\"https://customer-abc.example.com/XYZ123456789ABCD/manifest/video.m3u8\"></video>",
        );
        assert_eq!(outcome.nodes.len(), 1);
        let node = &outcome.nodes[0];
        assert_eq!(node.ty, NodeType::Video);
        assert_eq!(node.str_attr("providerAccountId"), Some("abc"));
        assert_eq!(node.str_attr("assetId"), Some("XYZ123456789ABCD"));
    }

    #[test]
    fn test_legacy_video_source_child() {
        let outcome = parse(
            "<video><source src=\"https://customer-xy.example.com/ABCDEF1234567890/manifest/v.m3u8\"></video>",
        );
        assert_eq!(outcome.nodes[0].str_attr("assetId"), Some("ABCDEF1234567890"));
    }

    #[test]
    fn test_image_missing_src_is_dropped_not_broken() {
        let outcome = parse("<figure data-type=\"image\"><img alt=\"no src\"></figure>");
        assert!(outcome.nodes.is_empty());
        assert_eq!(outcome.dropped.len(), 1);
        assert_eq!(outcome.dropped[0].ty, NodeType::Image);
        assert!(outcome.dropped[0].reason.contains("src"));
    }

    #[test]
    fn test_unresolvable_legacy_video_is_dropped() {
        let outcome = parse("<video src=\"https://example.com/\"></video>");
        assert!(outcome.nodes.is_empty());
        assert_eq!(outcome.dropped[0].ty, NodeType::Video);
    }

    #[test]
    fn test_quiz_wrapper() {
        let outcome = parse("<div data-type=\"quiz\" data-quiz-id=\"q-7\" data-align=\"left\"></div>");
        let node = &outcome.nodes[0];
        assert_eq!(node.ty, NodeType::Quiz);
        assert_eq!(node.str_attr("quizId"), Some("q-7"));
        assert_eq!(node.str_attr("align"), Some("left"));
    }

    #[test]
    fn test_callout_children_parse_through_standard_path() {
        let outcome = parse(
            "<div data-type=\"callout\" data-background-color=\"#FEF2F2\">\
             <p>warning</p><img src=\"/x.png\"></div>",
        );
        let node = &outcome.nodes[0];
        assert_eq!(node.ty, NodeType::Callout);
        assert_eq!(node.str_attr("backgroundColor"), Some("#FEF2F2"));
        assert_eq!(node.block_count(), 2);
        assert_eq!(node.block_child(0).unwrap().ty, NodeType::Paragraph);
        assert_eq!(node.block_child(1).unwrap().ty, NodeType::Image);
    }

    #[test]
    fn test_empty_callout_gets_placeholder_paragraph() {
        let outcome = parse("<div data-type=\"callout\"></div>");
        let node = &outcome.nodes[0];
        assert_eq!(node.block_count(), 1);
        assert!(node.validate());
    }

    #[test]
    fn test_unknown_wrapper_descends() {
        let outcome = parse("<div><p>inside</p></div>");
        assert_eq!(outcome.nodes.len(), 1);
        assert_eq!(outcome.nodes[0].ty, NodeType::Paragraph);
    }

    #[test]
    fn test_malformed_attrs_fall_back_to_defaults() {
        let outcome = parse(
            "<figure data-type=\"image\" data-align=\"sideways\" data-show-attribution=\"maybe\">\
             <img src=\"/p.png\" width=\"wide\"></figure>",
        );
        let node = &outcome.nodes[0];
        assert_eq!(node.str_attr("align"), Some("center"));
        assert_eq!(node.bool_attr("show_attribution"), Some(true));
        assert!(node.get_attr("width").unwrap().is_null());
    }

    #[test]
    fn test_video_wrapper_without_id_resolves_iframe() {
        let outcome = parse(
            "<div data-type=\"video\">\
             <iframe src=\"https://customer-qq.cloudflarestream.com/FEDCBA9876543210/iframe\"></iframe>\
             </div>",
        );
        let node = &outcome.nodes[0];
        assert_eq!(node.str_attr("assetId"), Some("FEDCBA9876543210"));
        assert_eq!(node.str_attr("providerAccountId"), Some("qq"));
    }
}
