//! Plain line-based terminal output.

use std::path::Path;

use crate::error::ApiError;
use crate::models::{HealthResponse, ReadinessResponse, SearchResponse, SourceDocument};
use crate::settings::Settings;

/// Line width for separators.
const LINE_WIDTH: usize = 60;

/// Characters of content shown per search result.
pub const SEARCH_PREVIEW_CHARS: usize = 300;

/// Status icons
pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const FAILURE: &str = "✗";
    pub const WARNING: &str = "⚠";
}

/// Print the main header.
///
/// ```text
/// LEXA
/// ════════════════════════════════════════════════════════════
/// ```
pub fn print_header(title: &str) {
    println!();
    println!("{}", title);
    println!("{}", "═".repeat(LINE_WIDTH));
    println!();
}

pub fn rule() -> String {
    "─".repeat(LINE_WIDTH)
}

/// Numbered source list.
///
/// ```text
/// [1] StGB § 32 (87.3%)
///     Notwehr ist die Verteidigung, die erforderlich ist, um …
/// ```
pub fn format_sources(sources: &[SourceDocument], preview_chars: usize) -> String {
    let mut out = String::new();
    for (i, source) in sources.iter().enumerate() {
        let label = if source.source_display.is_empty() {
            source.id.as_str()
        } else {
            source.source_display.as_str()
        };
        out.push_str(&format!(
            "[{}] {} ({})\n",
            i + 1,
            label,
            source.similarity_percent()
        ));
        let preview = source.preview(preview_chars).replace('\n', " ");
        out.push_str(&format!("    {}\n", preview.trim()));
    }
    out
}

pub fn format_search_results(response: &SearchResponse) -> String {
    if response.results.is_empty() {
        return format!("No results for \"{}\".\n", response.query);
    }
    format!(
        "{} result(s) for \"{}\"\n{}\n{}",
        response.count,
        response.query,
        rule(),
        format_sources(&response.results, SEARCH_PREVIEW_CHARS)
    )
}

/// Two status lines for the liveness and readiness probes.
pub fn format_health(
    health: &Result<HealthResponse, ApiError>,
    readiness: &Result<ReadinessResponse, ApiError>,
) -> String {
    let mut out = String::new();
    match health {
        Ok(h) if h.is_ok() => out.push_str(&format!("  {} Service: {}\n", icons::SUCCESS, h.status)),
        Ok(h) => out.push_str(&format!("  {} Service: {}\n", icons::WARNING, h.status)),
        Err(e) => out.push_str(&format!("  {} Service: {}\n", icons::FAILURE, e.user_message())),
    }
    match readiness {
        Ok(r) => {
            let icon = if r.database_connected() {
                icons::SUCCESS
            } else {
                icons::FAILURE
            };
            out.push_str(&format!(
                "  {} Database: {}\n",
                icon,
                r.database.as_deref().unwrap_or("unknown")
            ));
            out.push_str(&format!(
                "  {} LLM provider: {}\n",
                if r.llm_provider.is_some() { icons::SUCCESS } else { icons::WARNING },
                r.llm_provider
                    .as_deref()
                    .map(str::to_uppercase)
                    .unwrap_or_else(|| "unknown".to_string())
            ));
        }
        Err(e) => out.push_str(&format!("  {} Readiness: {}\n", icons::FAILURE, e.user_message())),
    }
    out
}

pub fn format_settings(settings: &Settings, path: Option<&Path>) -> String {
    let mut out = format!(
        "  top_k:                {}\n  similarity_threshold: {:.2}\n",
        settings.top_k, settings.similarity_threshold
    );
    if let Some(path) = path {
        out.push_str(&format!("  file:                 {}\n", path.display()));
    }
    out
}
