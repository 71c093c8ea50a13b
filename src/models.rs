//! Data models for articles returned by the news search service.
//!
//! This module defines the typed view the search UI takes of the relay's
//! pass-through JSON:
//! - [`Article`]: One search result, exactly as the service sent it
//! - [`ArticleSource`]: The publication an article came from
//!
//! The relay itself never deserializes into these types; it forwards the raw
//! body. Only the UI reads the `articles` array into [`Article`] values.
//!
//! Field names follow the service's camelCase JSON schema via
//! `#[serde(rename_all = "camelCase")]`.

use serde::{Deserialize, Serialize};

/// A single news article from a search result.
///
/// # Fields
///
/// * `title` - The headline
/// * `url` - Link to the full story on the publisher's site
/// * `published_at` - ISO-8601 publication timestamp, kept as received
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// The article headline.
    pub title: String,
    /// External link to the article.
    pub url: String,
    /// Publication timestamp as an ISO-8601 string.
    pub published_at: String,
    /// The publication the article came from.
    #[serde(default)]
    pub source: Option<ArticleSource>,
    /// Byline, when the service knows it.
    #[serde(default)]
    pub author: Option<String>,
    /// Short description or standfirst.
    #[serde(default)]
    pub description: Option<String>,
    /// Thumbnail image URL.
    #[serde(default)]
    pub url_to_image: Option<String>,
    /// Truncated content snippet.
    #[serde(default)]
    pub content: Option<String>,
}

/// Publication metadata attached to an [`Article`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ArticleSource {
    /// Service-assigned identifier, `null` for many smaller outlets.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name of the publication.
    pub name: String,
}
