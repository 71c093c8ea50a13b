//! Process-wide configuration, resolved once at startup.
//!
//! Values come from three layers, highest precedence first:
//!
//! 1. Command-line flags (see [`crate::cli::Cli`])
//! 2. Environment variables (`NEWS_API_KEY`, `NEWS_API_ENDPOINT`), via clap's `env` support
//! 3. An optional YAML file passed with `--config`
//!
//! The resolved [`Settings`] are read-only afterwards. The credential is held
//! in an [`ApiKey`], which never prints its value.

use crate::cli::Cli;
use serde::Deserialize;
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::fs;
use tracing::{info, instrument, warn};
use url::Url;

/// NewsAPI article search endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://newsapi.org/v2/everything";

/// Address the relay server binds to when nothing else is configured.
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Outbound request timeout when nothing else is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Secret key authorizing calls to the search service.
///
/// The value is only reachable through [`ApiKey::expose`], which the relay
/// calls when building the outbound URL. `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a raw key. Blank keys count as absent.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The raw key, for the outbound leg only.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Replace every occurrence of the key in `text`.
    pub fn redact(&self, text: &str) -> String {
        text.replace(&self.0, "[REDACTED]")
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

/// Shape of the optional YAML configuration file.
///
/// ```yaml
/// endpoint: https://newsapi.org/v2/everything
/// api_key: 0123456789abcdef
/// bind: 0.0.0.0:8080
/// timeout_secs: 5
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub bind: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Parse a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }
}

/// Resolved configuration shared by every surface of the application.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Article search endpoint the relay forwards to.
    pub endpoint: Url,
    /// Credential for the search service; `None` makes the relay report misconfiguration.
    pub api_key: Option<ApiKey>,
    /// Listen address for `serve`.
    pub bind: SocketAddr,
    /// Timeout applied to each outbound request.
    pub timeout: Duration,
}

impl Settings {
    /// Load the optional config file named by `--config` and merge CLI/env values over it.
    #[instrument(level = "info", skip_all, fields(config = ?cli.config))]
    pub async fn load(cli: &Cli) -> Result<Self, Box<dyn Error>> {
        let file = match &cli.config {
            Some(path) => {
                let yaml = fs::read_to_string(path).await?;
                info!(%path, "Loaded configuration file");
                FileConfig::from_yaml(&yaml)?
            }
            None => FileConfig::default(),
        };
        Self::merge(cli, file)
    }

    /// Combine CLI/env values with file values, CLI winning.
    pub fn merge(cli: &Cli, file: FileConfig) -> Result<Self, Box<dyn Error>> {
        let endpoint = cli
            .endpoint
            .clone()
            .or(file.endpoint)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let endpoint = Url::parse(&endpoint)?;

        let api_key = cli
            .api_key
            .clone()
            .and_then(ApiKey::new)
            .or_else(|| file.api_key.and_then(ApiKey::new));

        let bind = cli
            .bind
            .clone()
            .or(file.bind)
            .unwrap_or_else(|| DEFAULT_BIND.to_string())
            .parse::<SocketAddr>()?;

        let timeout = Duration::from_secs(
            cli.timeout_secs
                .or(file.timeout_secs)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        );

        if api_key.is_none() {
            warn!("No NEWS_API_KEY configured; relay calls will fail until one is provided");
        }

        Ok(Self {
            endpoint,
            api_key,
            bind,
            timeout,
        })
    }
}
