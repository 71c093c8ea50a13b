//! Error kinds produced by the news relay.
//!
//! [`RelayError`] is the single, closed set of failures a caller of the relay
//! can observe. It is built only by the relay layer ([`crate::relay`] and
//! [`crate::client`]), so consumers such as the search UI match on variants
//! instead of inspecting error payloads.
//!
//! # HTTP mapping
//!
//! | Variant | Status | Body |
//! |---------|--------|------|
//! | [`RelayError::InvalidRequest`] | 400 | `{"error": "Topic parameter is required"}` |
//! | [`RelayError::Misconfigured`] | 500 | `{"error": "News API key is not configured"}` |
//! | [`RelayError::UpstreamFailure`] | 502 | `{"error": "<message>"}` |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Failure of a single relay call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// The topic was missing or blank. No outbound call was made.
    #[error("Topic parameter is required")]
    InvalidRequest,

    /// The server holds no credential for the search service. No outbound call was made.
    #[error("News API key is not configured")]
    Misconfigured,

    /// The search service could not be reached, answered with a non-success
    /// status, or returned a body that is not JSON.
    #[error("{0}")]
    UpstreamFailure(String),
}

impl RelayError {
    /// Status code the relay server answers with for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::InvalidRequest => StatusCode::BAD_REQUEST,
            RelayError::Misconfigured => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::UpstreamFailure(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Rebuild an error from a relay server response, used by the remote client.
    ///
    /// `message` is the `error` field of the response body when one was present.
    /// A 500 only counts as [`RelayError::Misconfigured`] when it carries that
    /// variant's message; any other 500 came from something else on the path.
    pub fn from_status(status: StatusCode, message: Option<String>) -> Self {
        match status {
            StatusCode::BAD_REQUEST => RelayError::InvalidRequest,
            StatusCode::INTERNAL_SERVER_ERROR
                if message.as_deref() == Some(RelayError::Misconfigured.to_string().as_str()) =>
            {
                RelayError::Misconfigured
            }
            _ => RelayError::UpstreamFailure(
                message.unwrap_or_else(|| format!("Error: {}", status.as_u16())),
            ),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            RelayError::InvalidRequest => warn!(%status, "Rejected request without topic"),
            RelayError::Misconfigured => error!(%status, "Relay has no API key configured"),
            RelayError::UpstreamFailure(msg) => error!(%status, error = %msg, "Upstream search failed"),
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(RelayError::InvalidRequest.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            RelayError::Misconfigured.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            RelayError::UpstreamFailure("boom".to_string()).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            RelayError::InvalidRequest.to_string(),
            "Topic parameter is required"
        );
        assert_eq!(
            RelayError::Misconfigured.to_string(),
            "News API key is not configured"
        );
        assert_eq!(
            RelayError::UpstreamFailure("Failed to fetch news".to_string()).to_string(),
            "Failed to fetch news"
        );
    }

    #[test]
    fn test_from_status_round_trips_variants() {
        for err in [
            RelayError::InvalidRequest,
            RelayError::Misconfigured,
            RelayError::UpstreamFailure("Failed to fetch news".to_string()),
        ] {
            let rebuilt = RelayError::from_status(err.status(), Some(err.to_string()));
            assert_eq!(rebuilt, err);
        }
    }

    #[test]
    fn test_from_status_without_message() {
        let err = RelayError::from_status(StatusCode::SERVICE_UNAVAILABLE, None);
        assert_eq!(err, RelayError::UpstreamFailure("Error: 503".to_string()));
    }

    #[test]
    fn test_from_status_other_500_is_upstream_failure() {
        let err = RelayError::from_status(
            StatusCode::INTERNAL_SERVER_ERROR,
            Some("proxy exploded".to_string()),
        );
        assert_eq!(err, RelayError::UpstreamFailure("proxy exploded".to_string()));

        let err = RelayError::from_status(StatusCode::INTERNAL_SERVER_ERROR, None);
        assert_eq!(err, RelayError::UpstreamFailure("Error: 500".to_string()));
    }

    #[tokio::test]
    async fn test_into_response_body() {
        let response = RelayError::InvalidRequest.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Topic parameter is required");
    }
}
