//! The query relay: topic in, upstream JSON out.
//!
//! [`NewsRelay`] owns the search service credential and is the only place it
//! is ever attached to a request. Callers hand it a topic and get back either
//! the service's response body, untouched, or a [`RelayError`].
//!
//! # Architecture
//!
//! - [`ArticleSearch`]: The seam the search UI is generic over
//! - [`NewsRelay`]: In-process implementation calling the search service directly
//! - [`crate::client::RemoteRelay`]: Implementation calling a running relay server
//!
//! # Outbound request
//!
//! ```text
//! GET {endpoint}?q={topic}&sortBy=publishedAt&apiKey={key}
//! ```
//!
//! Nothing is retried. A failed call surfaces as
//! [`RelayError::UpstreamFailure`] and the user has to search again.

use crate::config::{ApiKey, Settings};
use crate::error::RelayError;
use crate::utils::{looks_truncated, truncate_for_log};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Something that can answer a topic search with the service's JSON body.
///
/// Implementors must never return the search service credential in either
/// the success value or the error.
pub trait ArticleSearch {
    /// Search for articles about `topic`.
    async fn search(&self, topic: &str) -> Result<Value, RelayError>;
}

/// Relay that forwards searches to the article search service.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct NewsRelay {
    client: reqwest::Client,
    endpoint: Url,
    api_key: Option<ApiKey>,
}

impl NewsRelay {
    /// Build a relay from its parts. `api_key` of `None` makes every call fail
    /// with [`RelayError::Misconfigured`].
    pub fn new(client: reqwest::Client, endpoint: Url, api_key: Option<ApiKey>) -> Self {
        Self {
            client,
            endpoint,
            api_key,
        }
    }

    /// Build a relay with an HTTP client honoring the configured timeout.
    pub fn from_settings(settings: &Settings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::new(
            client,
            settings.endpoint.clone(),
            settings.api_key.clone(),
        ))
    }

    /// The outbound URL for `topic`, with the credential attached.
    fn outbound_url(&self, topic: &str, key: &ApiKey) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", topic)
            .append_pair("sortBy", "publishedAt")
            .append_pair("apiKey", key.expose());
        url
    }

    /// Relay one search.
    ///
    /// # Errors
    ///
    /// - [`RelayError::InvalidRequest`] if `topic` is blank; nothing is sent
    /// - [`RelayError::Misconfigured`] if no credential is configured; nothing is sent
    /// - [`RelayError::UpstreamFailure`] on transport errors, non-2xx statuses,
    ///   or a body that is not JSON
    #[instrument(level = "info", skip_all, fields(topic = %topic.trim()))]
    pub async fn handle(&self, topic: &str) -> Result<Value, RelayError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(RelayError::InvalidRequest);
        }
        let key = self.api_key.as_ref().ok_or(RelayError::Misconfigured)?;

        let t0 = Instant::now();
        let response = self
            .client
            .get(self.outbound_url(topic, key))
            .send()
            .await
            .map_err(|e| transport_failure(e, key))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                %status,
                elapsed_ms = t0.elapsed().as_millis() as u64,
                body_preview = %truncate_for_log(&key.redact(&body), 300),
                "Search service returned an error status"
            );
            return Err(RelayError::UpstreamFailure(format!(
                "news service returned {}",
                status
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| transport_failure(e, key))?;
        let body: Value = serde_json::from_slice(&bytes).map_err(|e| {
            warn!(
                error = %e,
                body_preview = %truncate_for_log(&key.redact(&String::from_utf8_lossy(&bytes)), 300),
                "Search service returned malformed JSON"
            );
            if looks_truncated(&e) {
                RelayError::UpstreamFailure("news service returned a truncated response".to_string())
            } else {
                RelayError::UpstreamFailure("news service returned malformed JSON".to_string())
            }
        })?;

        info!(
            elapsed_ms = t0.elapsed().as_millis() as u64,
            total_results = ?body.get("totalResults"),
            "Relayed search"
        );
        debug!(bytes = bytes.len(), "Upstream body size");
        Ok(body)
    }
}

impl ArticleSearch for NewsRelay {
    async fn search(&self, topic: &str) -> Result<Value, RelayError> {
        self.handle(topic).await
    }
}

/// Map a reqwest failure to a message safe to show the caller.
///
/// reqwest embeds the request URL (and so the `apiKey` parameter) in its
/// error text; the URL is stripped and the remainder redacted.
fn transport_failure(e: reqwest::Error, key: &ApiKey) -> RelayError {
    let message = if e.is_timeout() {
        "request to the news service timed out".to_string()
    } else {
        format!(
            "could not reach the news service: {}",
            key.redact(&e.without_url().to_string())
        )
    };
    warn!(error = %message, "Search service request failed");
    RelayError::UpstreamFailure(message)
}
