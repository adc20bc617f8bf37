//! Interfaces to external collaborators.
//!
//! The document core never talks to storage or the network itself; the
//! host supplies these seams. Both are best-effort: a missing quiz just
//! has no preview, and media registration failure never blocks an
//! insertion.

use compact_str::CompactString;
use rustc_hash::FxHashMap;

// =============================================================================
// Quiz lookup
// =============================================================================

/// Quiz metadata used for preview rendering only - never stored inline
/// in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizMeta {
    pub id: CompactString,
    pub title: String,
    pub question_count: usize,
}

/// Looks up quiz metadata by id.
pub trait QuizDirectory {
    fn lookup(&self, quiz_id: &str) -> Option<QuizMeta>;
}

/// In-memory quiz directory, useful for tests and offline previews.
#[derive(Debug, Default)]
pub struct StaticQuizDirectory {
    entries: FxHashMap<CompactString, QuizMeta>,
}

impl StaticQuizDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, meta: QuizMeta) {
        self.entries.insert(meta.id.clone(), meta);
    }
}

impl QuizDirectory for StaticQuizDirectory {
    fn lookup(&self, quiz_id: &str) -> Option<QuizMeta> {
        self.entries.get(quiz_id).cloned()
    }
}

// =============================================================================
// Media registration
// =============================================================================

/// Notified when an image node enters the tree. Fire-and-forget: the
/// sink must not fail the insertion, so the method returns nothing.
pub trait MediaSink {
    fn register(&self, src: &str);
}

/// Sink that drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMediaSink;

impl MediaSink for NoopMediaSink {
    fn register(&self, _src: &str) {}
}
