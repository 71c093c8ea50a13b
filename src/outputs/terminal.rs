//! Plain-text and JSON rendering for the command-line surfaces.

use crate::ui::{NO_NEWS_YET_PROMPT, SearchState};
use crate::utils::local_published_date;
use serde_json::json;
use std::fmt::Write;

/// Render `state` as a numbered list, an error line, or the empty prompt.
///
/// ```text
/// 1. Headline
///    https://example.com/story
///    Published: 3/7/2025
/// ```
pub fn render_text(state: &SearchState) -> String {
    let mut out = String::new();

    if let Some(error) = &state.error {
        writeln!(out, "{}", error).unwrap();
    } else if state.results.is_empty() {
        writeln!(out, "{}", NO_NEWS_YET_PROMPT).unwrap();
    } else {
        for (i, article) in state.results.iter().enumerate() {
            writeln!(out, "{}. {}", i + 1, article.title).unwrap();
            writeln!(out, "   {}", article.url).unwrap();
            match article.source.as_ref() {
                Some(source) => writeln!(
                    out,
                    "   Published: {} ({})",
                    local_published_date(&article.published_at),
                    source.name
                )
                .unwrap(),
                None => writeln!(
                    out,
                    "   Published: {}",
                    local_published_date(&article.published_at)
                )
                .unwrap(),
            }
        }
    }

    out
}

/// Render `state` as `{"articles": [...]}` or `{"error": "..."}`.
pub fn render_json(state: &SearchState) -> Result<String, serde_json::Error> {
    let value = match &state.error {
        Some(error) => json!({ "error": error }),
        None => json!({ "articles": state.results }),
    };
    serde_json::to_string_pretty(&value)
}
