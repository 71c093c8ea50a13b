//! Search UI state machine.
//!
//! One [`SearchUi`] is one user session: it holds the topic being typed, the
//! article list, an error message, and the loading flag, and moves between
//! phases as the user submits and the relay answers.
//!
//! ```text
//!            submit                 relay answers
//!   Idle ───────────────► Loading ─────────────────► Success
//!     ▲                      ▲   └─────────────────► Failure
//!     │                      │                          │
//!     └── empty topic        └──────── submit ──────────┘
//!         (prompt, no call)
//! ```
//!
//! Submitting while a search is outstanding is rejected with
//! [`SubmitError::Busy`] rather than racing two relay calls.

use crate::error::RelayError;
use crate::models::Article;
use crate::relay::ArticleSearch;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Shown when the user submits a blank topic.
pub const EMPTY_TOPIC_PROMPT: &str = "Please enter a topic!";

/// Shown when the service answered but found nothing.
pub const NO_ARTICLES_MESSAGE: &str = "No articles found for this topic.";

/// Shown before the first search, on every surface.
pub const NO_NEWS_YET_PROMPT: &str = "No news yet. Enter a topic and click Search!";

/// Where the session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Failure,
}

/// Why a submit was refused locally.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    #[error("{}", EMPTY_TOPIC_PROMPT)]
    EmptyTopic,
    #[error("A search is already in progress")]
    Busy,
}

/// Everything the renderers need to draw the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub topic: String,
    pub results: Vec<Article>,
    pub error: Option<String>,
    pub loading: bool,
}

impl SearchState {
    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Failure
        } else if !self.results.is_empty() {
            Phase::Success
        } else {
            Phase::Idle
        }
    }
}

/// A search session.
#[derive(Debug, Default)]
pub struct SearchUi {
    state: SearchState,
}

impl SearchUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Replace the topic text, as typing into the input does.
    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.state.topic = topic.into();
    }

    /// Start a search for the current topic.
    ///
    /// On success the session is `Loading` and the trimmed topic to send is
    /// returned; the caller must follow up with [`SearchUi::complete`].
    /// A blank topic or an outstanding search leaves the state untouched.
    pub fn begin(&mut self) -> Result<String, SubmitError> {
        if self.state.loading {
            warn!("Ignoring submit while a search is in flight");
            return Err(SubmitError::Busy);
        }
        let topic = self.state.topic.trim();
        if topic.is_empty() {
            debug!("Rejected blank topic");
            return Err(SubmitError::EmptyTopic);
        }
        let topic = topic.to_string();
        self.state.loading = true;
        self.state.error = None;
        debug!(%topic, "Search started");
        Ok(topic)
    }

    /// Apply the relay's answer to the outstanding search.
    pub fn complete(&mut self, outcome: Result<Value, RelayError>) {
        self.state.loading = false;
        match outcome.map(|body| read_articles(&body)) {
            Ok(Ok(articles)) if !articles.is_empty() => {
                info!(count = articles.len(), "Search succeeded");
                self.state.results = articles;
                self.state.error = None;
            }
            Ok(Ok(_)) => {
                info!("Search returned no articles");
                self.fail(NO_ARTICLES_MESSAGE.to_string());
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Article list did not match the expected shape");
                self.fail("Failed to fetch news: malformed article list".to_string());
            }
            Err(e) => {
                warn!(error = %e, "Search failed");
                self.fail(format!("Failed to fetch news: {}", e));
            }
        }
    }

    /// Submit the current topic through `search` and wait for the answer.
    ///
    /// Makes exactly one [`ArticleSearch::search`] call when the submit is
    /// accepted, none otherwise.
    #[instrument(level = "info", skip_all, fields(topic = %self.state.topic))]
    pub async fn submit<S: ArticleSearch>(&mut self, search: &S) -> Result<Phase, SubmitError> {
        let topic = self.begin()?;
        let outcome = search.search(&topic).await;
        self.complete(outcome);
        Ok(self.phase())
    }

    fn fail(&mut self, message: String) {
        self.state.results.clear();
        self.state.error = Some(message);
    }
}

/// Read `body.articles` as a list. Absent or `null` counts as empty.
fn read_articles(body: &Value) -> Result<Vec<Article>, serde_json::Error> {
    match body.get("articles") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(list) => Vec::<Article>::deserialize(list),
    }
}
