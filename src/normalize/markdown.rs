//! Markdown spacing repair.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// `** text **` on a single line. Markers pair left to right.
static BOLD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*[ \t]*([^*\n]+?)[ \t]*\*\*").expect("Invalid bold regex")
});

/// `1 .` ordinal / list markers
static ORDINAL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)[ \t]+\.").expect("Invalid ordinal regex"));

static PUNCTUATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\w)[ \t]+([.,;:!?)])").expect("Invalid punctuation spacing regex")
});

static SPACE_RUN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]{2,}").expect("Invalid space run regex"));

static DISCLAIMER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*Hinweis:\s*Dieser").expect("Invalid disclaimer regex")
});

const DISCLAIMER: &str = "Hinweis: Dieser";

/// Repair markdown spacing in finished answer text.
pub fn repair_markdown(text: &str) -> String {
    let text = BOLD_REGEX.replace_all(text, "**$1**");
    let text = ORDINAL_REGEX.replace_all(&text, "$1.");
    let text = PUNCTUATION_REGEX.replace_all(&text, "$1$2");
    let text = collapse_space_runs(&text);
    place_disclaimer(&text)
}

/// Collapse interior runs of blanks to one space. Leading indentation and
/// trailing blanks (markdown hard breaks) are kept.
fn collapse_space_runs(text: &str) -> String {
    SPACE_RUN_REGEX
        .replace_all(text, |caps: &Captures| {
            let m = caps.get(0).map(|m| (m.start(), m.end()));
            let Some((start, end)) = m else {
                return String::new();
            };
            let at_line_start = start == 0 || text[..start].ends_with('\n');
            let at_line_end = end == text.len() || text[end..].starts_with('\n');
            if at_line_start || at_line_end {
                caps[0].to_string()
            } else {
                " ".to_string()
            }
        })
        .into_owned()
}

/// The disclaimer always opens its own paragraph, except at the very start.
fn place_disclaimer(text: &str) -> String {
    DISCLAIMER_REGEX
        .replace_all(text, |caps: &Captures| {
            let at_start = caps.get(0).is_some_and(|m| m.start() == 0);
            if at_start {
                DISCLAIMER.to_string()
            } else {
                format!("\n\n{}", DISCLAIMER)
            }
        })
        .into_owned()
}
