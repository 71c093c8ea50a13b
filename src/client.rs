//! Client for a running relay server.
//!
//! [`RemoteRelay`] lets the CLI search without holding the credential: it
//! calls `GET {base}/api/news?topic=...` on a relay started with
//! `pulse_news serve` and turns the server's status codes back into
//! [`RelayError`] variants.

use crate::error::RelayError;
use crate::relay::ArticleSearch;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{instrument, warn};
use url::Url;

/// Error body written by the relay server.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// [`ArticleSearch`] backed by a relay server reachable over HTTP.
#[derive(Debug, Clone)]
pub struct RemoteRelay {
    client: reqwest::Client,
    base: Url,
}

impl RemoteRelay {
    pub fn new(client: reqwest::Client, base: Url) -> Self {
        Self { client, base }
    }

    /// Build a client for the relay at `base` with a per-request timeout.
    pub fn connect(base: &str, timeout: Duration) -> Result<Self, Box<dyn std::error::Error>> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::new(client, Url::parse(base)?))
    }

    fn news_url(&self, topic: &str) -> String {
        format!(
            "{}/api/news?topic={}",
            self.base.as_str().trim_end_matches('/'),
            urlencoding::encode(topic)
        )
    }

    #[instrument(level = "info", skip_all, fields(base = %self.base))]
    pub async fn handle(&self, topic: &str) -> Result<Value, RelayError> {
        let response = self
            .client
            .get(self.news_url(topic))
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Relay server unreachable");
                RelayError::UpstreamFailure(format!(
                    "could not reach the relay: {}",
                    e.without_url()
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.json::<ErrorBody>().await.ok().map(|b| b.error);
            warn!(%status, ?message, "Relay server returned an error");
            return Err(RelayError::from_status(status, message));
        }

        response.json::<Value>().await.map_err(|e| {
            RelayError::UpstreamFailure(format!(
                "relay returned malformed JSON: {}",
                e.without_url()
            ))
        })
    }
}

impl ArticleSearch for RemoteRelay {
    async fn search(&self, topic: &str) -> Result<Value, RelayError> {
        self.handle(topic).await
    }
}
