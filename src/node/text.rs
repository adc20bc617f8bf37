//! Text node type.
//!
//! Plain inline content inside paragraphs and headings.

// =============================================================================
// Text
// =============================================================================

/// Text content node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    /// Text content
    pub content: String,
}

impl Text {
    /// Create a new text node.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Check if text content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Text length in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check if text is only whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Get trimmed content.
    pub fn trimmed(&self) -> &str {
        self.content.trim()
    }
}
