//! Quiz node schema: a reference to an external quiz entity.

use crate::attr::{Attrs, AttrsExt};

use super::choices::{Align, ALIGN_VALUES};
use super::{AttrDefault, AttrKind, AttrSpec};

/// Attribute table for quiz nodes.
pub(super) static SPEC: [AttrSpec; 2] = [
    AttrSpec::new("quizId", "data-quiz-id", AttrKind::Str, AttrDefault::Null).required(),
    AttrSpec::new(
        "align",
        "data-align",
        AttrKind::Choice(ALIGN_VALUES),
        AttrDefault::Str("center"),
    ),
];

/// Typed read of a quiz node's attrs.
#[derive(Debug, Clone, Default)]
pub struct QuizAttrs {
    pub quiz_id: Option<String>,
    pub align: Align,
}

impl QuizAttrs {
    pub fn from_attrs(attrs: &Attrs) -> Self {
        Self {
            quiz_id: attrs.str_attr("quizId").map(str::to_string),
            align: attrs
                .str_attr("align")
                .and_then(Align::parse)
                .unwrap_or_default(),
        }
    }
}
