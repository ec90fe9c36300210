//! Post-completion text repair.
//!
//! Answers are repaired once, after the last token has arrived. Two
//! independent passes run in order:
//!
//! 1. `rules` - OCR word-splitting artifacts from the indexed statutes and
//!    a stray decorative emoji
//! 2. `markdown` - spacing inside bold markers, ordinal markers and before
//!    punctuation, plus disclaimer placement
//!
//! Both are pure and deterministic.

mod markdown;
mod rules;

pub use markdown::repair_markdown;
pub use rules::{ocr_rules, repair_ocr, Repair, RepairRule};

/// Run the full repair over finished answer text.
pub fn normalize(text: &str) -> String {
    let repaired = repair_ocr(text);
    repair_markdown(&repaired)
}
