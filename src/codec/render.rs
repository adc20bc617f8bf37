//! Rendering block nodes to the canonical HTML storage format.
//!
//! Every rich node renders as a wrapper carrying `data-type` plus the
//! schema's data-attribute contributions (the structural contract that
//! makes parse able to round-trip it), followed by the visual markup.

use url::Url;

use crate::node::{BlockNode, Node, NodeType};
use crate::resolver::{build_embed_url, ResolverConfig};
use crate::schema::{self, ButtonAttrs, CalloutAttrs, ImageAttrs, QuizAttrs, VideoAttrs};

/// Render a sequence of blocks to an HTML fragment.
pub fn render_fragment(blocks: &[BlockNode], config: &ResolverConfig) -> String {
    let mut out = String::new();
    for block in blocks {
        render_node(block, config, &mut out);
    }
    out
}

/// Render a single block node (and its subtree) to HTML.
pub fn render_node(block: &BlockNode, config: &ResolverConfig, out: &mut String) {
    match block.ty {
        NodeType::Image => render_image(block, out),
        NodeType::Video => render_video(block, config, out),
        NodeType::Quiz => render_quiz(block, config, out),
        NodeType::Button => render_button(block, out),
        NodeType::Callout => render_callout(block, config, out),
        NodeType::Paragraph => render_text_block(block, "p", out),
        NodeType::Heading => {
            let tag = format!("h{}", block.heading_level());
            render_text_block(block, &tag, out);
        }
    }
}

// =============================================================================
// Per-type rendering
// =============================================================================

fn open_wrapper(tag: &str, ty: NodeType, attrs: &BlockNode, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    push_attr(out, "data-type", ty.as_str());
    let mut contributions = Vec::new();
    schema::render_attrs(ty, &attrs.attrs, &mut contributions);
    for (name, value) in &contributions {
        push_attr(out, name, value);
    }
}

fn render_image(block: &BlockNode, out: &mut String) {
    let image = ImageAttrs::from_attrs(&block.attrs);
    open_wrapper("figure", NodeType::Image, block, out);
    out.push('>');

    let linked = image.source_url.as_deref().filter(|u| !u.is_empty());
    if let Some(url) = linked {
        out.push_str("<a");
        push_attr(out, "href", url);
        push_attr(out, "target", "_blank");
        push_attr(out, "rel", "noopener noreferrer");
        out.push('>');
    }
    out.push_str("<img");
    push_attr(out, "src", &image.src);
    push_attr(out, "alt", &image.alt);
    if let Some(width) = &image.width {
        push_attr(out, "width", width);
    }
    if let Some(height) = &image.height {
        push_attr(out, "height", height);
    }
    out.push_str(" />");
    if linked.is_some() {
        out.push_str("</a>");
    }

    if image.wants_attribution()
        && let Some(url) = &image.source_url
    {
        render_attribution(&image, url, out);
    }
    out.push_str("</figure>");
}

/// Caption of the literal form `Image: {name}{ (year)}. (link){ — note}`.
fn render_attribution(image: &ImageAttrs, source_url: &str, out: &mut String) {
    let name = image
        .source_name
        .clone()
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| derive_source_name(source_url));

    out.push_str("<figcaption>Image: ");
    out.push_str(&escape_html(&name));
    if let Some(year) = image.year.as_deref().filter(|y| !y.is_empty()) {
        out.push_str(" (");
        out.push_str(&escape_html(year));
        out.push(')');
    }
    out.push_str(". <a");
    push_attr(out, "href", source_url);
    push_attr(out, "target", "_blank");
    push_attr(out, "rel", "noopener noreferrer");
    out.push_str(">(link)</a>");
    if let Some(note) = image.license_note.as_deref().filter(|n| !n.is_empty()) {
        out.push_str(" — ");
        out.push_str(&escape_html(note));
    }
    out.push_str("</figcaption>");
}

/// Fallback attribution name: first host label, capitalized.
fn derive_source_name(source_url: &str) -> String {
    let host = Url::parse(source_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string));
    let Some(host) = host else {
        return "source".to_string();
    };
    let label = host.trim_start_matches("www.").split('.').next().unwrap_or("source");
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => "source".to_string(),
    }
}

fn render_video(block: &BlockNode, config: &ResolverConfig, out: &mut String) {
    let video = VideoAttrs::from_attrs(&block.attrs);
    open_wrapper("div", NodeType::Video, block, out);
    out.push('>');

    let embed = video.asset_id.as_deref().and_then(|asset| {
        build_embed_url(
            config,
            video.provider_account_id.as_deref(),
            asset,
            video.theme_color.as_deref(),
            &video.embed_options(),
        )
    });
    match embed {
        Some(src) => {
            out.push_str("<iframe");
            push_attr(out, "src", &src);
            push_attr(out, "title", &video.title);
            push_attr(out, "allow", "accelerometer; autoplay; encrypted-media; picture-in-picture");
            out.push_str(" allowfullscreen></iframe>");
        }
        None => {
            // Never an empty/silent node: the failure must be visible.
            out.push_str("<div class=\"embed-error\">Video unavailable: could not resolve embed URL</div>");
        }
    }
    out.push_str("</div>");
}

fn render_quiz(block: &BlockNode, config: &ResolverConfig, out: &mut String) {
    let quiz = QuizAttrs::from_attrs(&block.attrs);
    open_wrapper("div", NodeType::Quiz, block, out);
    out.push('>');
    let meta = quiz.quiz_id.as_deref().and_then(|id| config.quiz_meta(id));
    match meta {
        Some(meta) => {
            out.push_str("<div class=\"quiz-embed\"><span class=\"quiz-title\">");
            out.push_str(&escape_html(&meta.title));
            out.push_str("</span><span class=\"quiz-questions\">");
            out.push_str(&meta.question_count.to_string());
            out.push_str(" questions</span></div>");
        }
        // No directory or unknown quiz: a bare reference placeholder.
        None => {
            out.push_str("<div class=\"quiz-embed\">Quiz ");
            out.push_str(&escape_html(quiz.quiz_id.as_deref().unwrap_or("?")));
            out.push_str("</div>");
        }
    }
    out.push_str("</div>");
}

fn render_button(block: &BlockNode, out: &mut String) {
    let button = ButtonAttrs::from_attrs(&block.attrs);
    open_wrapper("div", NodeType::Button, block, out);
    out.push('>');
    out.push_str("<a");
    push_attr(out, "class", &button.class_list());
    push_attr(out, "href", &button.url);
    if button.color == schema::ButtonColor::Custom
        && let Some(color) = &button.custom_color
    {
        push_attr(out, "style", &format!("background-color: {color};"));
    }
    out.push('>');
    out.push_str(&escape_html(&button.text));
    out.push_str("</a></div>");
}

fn render_callout(block: &BlockNode, config: &ResolverConfig, out: &mut String) {
    let callout = CalloutAttrs::from_attrs(&block.attrs);
    open_wrapper("div", NodeType::Callout, block, out);
    push_attr(out, "style", &callout.style());
    out.push('>');
    // Children go through the standard block path; the codec does not
    // special-case callout content.
    for child in &block.children {
        match child {
            Node::Block(b) => render_node(b, config, out),
            Node::Text(t) => out.push_str(&escape_html(&t.content)),
        }
    }
    out.push_str("</div>");
}

fn render_text_block(block: &BlockNode, tag: &str, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    for child in &block.children {
        if let Node::Text(t) = child {
            out.push_str(&escape_html(&t.content));
        }
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

// =============================================================================
// Escaping
// =============================================================================

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_attr(value));
    out.push('"');
}

/// Escape HTML special characters.
pub(crate) fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape attribute value special characters.
pub(crate) fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::{AttrValue, AttrsExt};

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
    }

    #[test]
    fn test_paragraph_and_heading() {
        let config = ResolverConfig::new();
        let html = render_fragment(
            &[
                BlockNode::heading(3, "Title"),
                BlockNode::paragraph("a < b"),
            ],
            &config,
        );
        assert_eq!(html, "<h3>Title</h3><p>a &lt; b</p>");
    }

    #[test]
    fn test_image_wrapper_contract() {
        let config = ResolverConfig::new();
        let mut node = BlockNode::image("/hero.png");
        node.attrs.set_attr("width", AttrValue::str("320"));
        let html = render_fragment(&[node], &config);

        assert!(html.starts_with("<figure data-type=\"image\""));
        assert!(html.contains("data-align=\"center\""));
        assert!(html.contains("data-show-attribution=\"true\""));
        assert!(html.contains("<img src=\"/hero.png\" alt=\"\" width=\"320\" />"));
        // No attribution caption without a source_url
        assert!(!html.contains("figcaption"));
    }

    #[test]
    fn test_derived_source_name() {
        assert_eq!(derive_source_name("https://a.com/p"), "A");
        assert_eq!(derive_source_name("https://www.unsplash.com/photo/1"), "Unsplash");
        assert_eq!(derive_source_name("not a url"), "source");
    }

    #[test]
    fn test_video_error_marker_when_unresolvable() {
        // No account id on the node, no fallback configured
        let config = ResolverConfig::new();
        let node = BlockNode::video("XYZ123456789ABCD", None);
        let html = render_fragment(&[node], &config);

        assert!(html.contains("class=\"embed-error\""));
        assert!(!html.contains("<iframe"));
        // The wrapper still carries the stored reference for round-trip
        assert!(html.contains("data-video-id=\"XYZ123456789ABCD\""));
    }

    #[test]
    fn test_quiz_preview_from_directory() {
        use std::sync::Arc;

        use crate::collab::{QuizMeta, StaticQuizDirectory};

        let mut dir = StaticQuizDirectory::new();
        dir.insert(QuizMeta {
            id: "q-9".into(),
            title: "Chapter check".into(),
            question_count: 3,
        });
        let config = ResolverConfig::new().with_quiz_directory(Arc::new(dir));

        let html = render_fragment(&[BlockNode::quiz("q-9")], &config);
        assert!(html.contains("quiz-title\">Chapter check</span>"));
        assert!(html.contains("3 questions"));
        // The preview is presentation only; the stored reference stays
        // on the wrapper for round-trip.
        assert!(html.contains("data-quiz-id=\"q-9\""));

        // Unknown quiz falls back to the bare placeholder.
        let html = render_fragment(&[BlockNode::quiz("q-404")], &config);
        assert!(html.contains(">Quiz q-404</div>"));
    }

    #[test]
    fn test_quiz_placeholder_without_directory() {
        let config = ResolverConfig::new();
        let html = render_fragment(&[BlockNode::quiz("q-9")], &config);
        assert!(html.contains(">Quiz q-9</div>"));
    }

    #[test]
    fn test_button_custom_color_style() {
        let config = ResolverConfig::new();
        let mut node = BlockNode::button("Buy", "https://shop.example.com");
        node.attrs.set_attr("color", AttrValue::str("custom"));
        node.attrs.set_attr("customColor", AttrValue::str("#3B82F6"));
        let html = render_fragment(&[node], &config);

        assert!(html.contains("data-color=\"custom\""));
        assert!(html.contains("background-color: #3B82F6;"));
        assert!(html.contains(">Buy</a>"));
    }

    #[test]
    fn test_callout_renders_children_recursively() {
        let config = ResolverConfig::new();
        let node = BlockNode::callout(
            Vec::new(),
            [BlockNode::paragraph("note"), BlockNode::image("/i.png")],
        );
        let html = render_fragment(&[node], &config);

        assert!(html.starts_with("<div data-type=\"callout\""));
        assert!(html.contains("<p>note</p>"));
        assert!(html.contains("data-type=\"image\""));
        assert!(html.contains("background-color: #EFF6FF"));
    }
}
