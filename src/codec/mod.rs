//! Bidirectional HTML codec for the stored document format.
//!
//! `render` writes blocks to the canonical wrapper markup; `parse`
//! reads that markup (and several legacy shapes) back. For every node
//! the parser accepts, `parse(render(node))` is content-equal to the
//! original; identity is assigned fresh on parse and deliberately
//! outside the law.

mod parse;
mod render;

pub use parse::{parse_fragment, DroppedNode, ParseOutcome};
pub use render::{render_fragment, render_node};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::AttrValue;
    use crate::node::{BlockNode, NodeType};
    use crate::resolver::ResolverConfig;

    fn round_trip(node: &BlockNode) -> BlockNode {
        let config = ResolverConfig::new();
        let html = render_fragment(std::slice::from_ref(node), &config);
        let mut outcome = parse_fragment(&html, &config);
        assert!(
            outcome.dropped.is_empty(),
            "round trip dropped nodes: {:?}",
            outcome.dropped
        );
        assert_eq!(outcome.nodes.len(), 1, "html: {html}");
        outcome.nodes.remove(0)
    }

    #[test]
    fn test_round_trip_image() {
        let mut node = BlockNode::image("/uploads/hero.png");
        node.set_attr("alt", AttrValue::str("Hero"));
        node.set_attr("width", AttrValue::str("640"));
        node.set_attr("align", AttrValue::str("right"));
        assert!(round_trip(&node).content_eq(&node));
    }

    #[test]
    fn test_round_trip_video() {
        let mut node = BlockNode::video("XYZ123456789ABCD", Some("abc"));
        node.set_attr("themeColor", AttrValue::str("#FF5500"));
        node.set_attr("autoplay", AttrValue::Bool(false));
        node.set_attr("title", AttrValue::str("Launch recap"));
        assert!(round_trip(&node).content_eq(&node));
    }

    #[test]
    fn test_round_trip_quiz() {
        let node = BlockNode::quiz("quiz-42");
        assert!(round_trip(&node).content_eq(&node));
    }

    #[test]
    fn test_quiz_preview_markup_does_not_break_round_trip() {
        use std::sync::Arc;

        use crate::collab::{QuizMeta, StaticQuizDirectory};

        let mut dir = StaticQuizDirectory::new();
        dir.insert(QuizMeta {
            id: "quiz-42".into(),
            title: "Final review".into(),
            question_count: 10,
        });
        let config = ResolverConfig::new().with_quiz_directory(Arc::new(dir));

        let node = BlockNode::quiz("quiz-42");
        let html = render_fragment(std::slice::from_ref(&node), &config);
        assert!(html.contains("Final review"));

        let outcome = parse_fragment(&html, &config);
        assert!(outcome.nodes[0].content_eq(&node));
    }

    #[test]
    fn test_round_trip_button() {
        let mut node = BlockNode::button("Get started", "https://example.com/signup");
        node.set_attr("variant", AttrValue::str("bordered"));
        node.set_attr("color", AttrValue::str("custom"));
        node.set_attr("customColor", AttrValue::str("#3B82F6"));
        node.set_attr("radius", AttrValue::str("full"));
        assert!(round_trip(&node).content_eq(&node));
    }

    #[test]
    fn test_round_trip_callout_with_children() {
        let node = BlockNode::callout(
            vec![("backgroundColor".into(), AttrValue::str("#FEF2F2"))],
            [
                BlockNode::heading(3, "Heads up"),
                BlockNode::paragraph("Read this first."),
                BlockNode::image("/warn.png"),
            ],
        );
        assert!(round_trip(&node).content_eq(&node));
    }

    #[test]
    fn test_round_trip_standard_blocks() {
        for node in [
            BlockNode::paragraph("plain text with < and &"),
            BlockNode::heading(1, "Top"),
            BlockNode::heading(6, "Bottom"),
        ] {
            assert!(round_trip(&node).content_eq(&node));
        }
    }

    #[test]
    fn test_attribution_caption_from_bare_host() {
        let config = ResolverConfig::new();
        let mut node = BlockNode::image("/photo.jpg");
        node.set_attr("source_url", AttrValue::str("https://a.com/p/1"));
        let html = render_fragment(&[node.clone()], &config);

        // Name falls back to the capitalized first host label.
        assert!(html.contains("<figcaption>Image: A. "), "html: {html}");
        assert!(html.contains(">(link)</a>"));
        assert!(html.contains("href=\"https://a.com/p/1\""));

        // The caption is presentation only; the node still round-trips.
        let outcome = parse_fragment(&html, &config);
        assert!(outcome.nodes[0].content_eq(&node));
    }

    #[test]
    fn test_attribution_caption_full_form() {
        let config = ResolverConfig::new();
        let mut node = BlockNode::image("/photo.jpg");
        node.set_attr("source_url", AttrValue::str("https://www.unsplash.com/p/9"));
        node.set_attr("source_name", AttrValue::str("Jane Doe"));
        node.set_attr("year", AttrValue::str("2021"));
        node.set_attr("license_note", AttrValue::str("CC BY 4.0"));
        let html = render_fragment(&[node], &config);

        assert!(html.contains("Image: Jane Doe (2021). "));
        assert!(html.contains("(link)</a> — CC BY 4.0"));
    }

    #[test]
    fn test_attribution_suppressed_when_disabled() {
        let config = ResolverConfig::new();
        let mut node = BlockNode::image("/photo.jpg");
        node.set_attr("source_url", AttrValue::str("https://a.com/p"));
        node.set_attr("show_attribution", AttrValue::Bool(false));
        let html = render_fragment(&[node], &config);
        assert!(!html.contains("figcaption"));
    }

    #[test]
    fn test_legacy_video_upgrade() {
        let config = ResolverConfig::new();
        let outcome = parse_fragment(
            "<video src=\"https://customer-abc.example.com/XYZ123456789ABCD/manifest/video.m3u8\"></video>",
            &config,
        );
        let node = &outcome.nodes[0];
        assert_eq!(node.ty, NodeType::Video);
        assert_eq!(node.str_attr("providerAccountId"), Some("abc"));
        assert_eq!(node.str_attr("assetId"), Some("XYZ123456789ABCD"));

        // Upgraded node renders in the canonical shape from here on.
        let html = render_fragment(std::slice::from_ref(node), &config);
        assert!(html.contains("data-type=\"video\""));
        assert!(html.contains(
            "src=\"https://customer-abc.cloudflarestream.com/XYZ123456789ABCD/iframe\""
        ));
    }

    #[test]
    fn test_unresolvable_video_renders_visible_error() {
        let config = ResolverConfig::new();
        let node = BlockNode::video("XYZ123456789ABCD", None);
        let html = render_fragment(&[node], &config);
        assert!(html.contains("Video unavailable"));
        assert!(!html.contains("<iframe"));
    }

    #[test]
    fn test_mixed_fragment_preserves_order() {
        let config = ResolverConfig::new();
        let blocks = vec![
            BlockNode::heading(2, "Post"),
            BlockNode::paragraph("Intro."),
            BlockNode::quiz("q-1"),
            BlockNode::paragraph("Outro."),
        ];
        let html = render_fragment(&blocks, &config);
        let outcome = parse_fragment(&html, &config);

        assert_eq!(outcome.nodes.len(), blocks.len());
        for (parsed, original) in outcome.nodes.iter().zip(&blocks) {
            assert!(parsed.content_eq(original));
        }
    }
}
