use serde::{Deserialize, Serialize};

/// Characters of source content shown in previews.
pub const SOURCE_PREVIEW_CHARS: usize = 200;

/// A retrieved document snippet cited in support of an answer.
///
/// Opaque to the streaming pipeline: passed through exactly as received.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceDocument {
    pub id: String,
    pub content: String,
    /// Similarity score in [0, 1]
    pub similarity: f64,
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
    /// Human-readable label, e.g. "StGB § 32"
    #[serde(default)]
    pub source_display: String,
}

impl SourceDocument {
    /// Content truncated to `max_chars` characters, with an ellipsis when cut.
    pub fn preview(&self, max_chars: usize) -> String {
        match self.content.char_indices().nth(max_chars) {
            Some((idx, _)) => format!("{}…", &self.content[..idx]),
            None => self.content.clone(),
        }
    }

    /// Similarity formatted as a percentage with one decimal.
    pub fn similarity_percent(&self) -> String {
        format!("{:.1}%", self.similarity * 100.0)
    }
}
