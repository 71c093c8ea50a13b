//! Test support: a fake article search service on an ephemeral port.

use crate::cli::{Cli, Command};
use axum::{
    Router,
    extract::{Query, RawQuery, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use url::Url;

/// One request the fake upstream received.
#[derive(Debug, Clone)]
pub struct Hit {
    pub raw_query: String,
    pub params: HashMap<String, String>,
}

pub struct FakeUpstream {
    pub endpoint: Url,
    hits: Arc<Mutex<Vec<Hit>>>,
}

impl FakeUpstream {
    pub fn hits(&self) -> Vec<Hit> {
        self.hits.lock().unwrap().clone()
    }
}

#[derive(Clone)]
struct FakeState {
    status: StatusCode,
    body: String,
    hits: Arc<Mutex<Vec<Hit>>>,
}

async fn everything(
    State(state): State<FakeState>,
    RawQuery(raw): RawQuery,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    state.hits.lock().unwrap().push(Hit {
        raw_query: raw.unwrap_or_default(),
        params,
    });
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
}

/// Start a fake search service answering every request with `status` and `body`.
pub async fn spawn_upstream(status: StatusCode, body: impl Into<String>) -> FakeUpstream {
    let hits = Arc::new(Mutex::new(Vec::new()));
    let state = FakeState {
        status,
        body: body.into(),
        hits: hits.clone(),
    };
    let app = Router::new()
        .route("/v2/everything", get(everything))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeUpstream {
        endpoint: Url::parse(&format!("http://{}/v2/everything", addr)).unwrap(),
        hits,
    }
}

/// A `serve` invocation with no flags, built directly so `NEWS_API_*`
/// variables in the test environment cannot leak in through clap.
pub fn bare_cli() -> Cli {
    Cli {
        config: None,
        api_key: None,
        endpoint: None,
        bind: None,
        timeout_secs: None,
        command: Command::Serve,
    }
}

/// An endpoint on a port nothing listens on.
pub async fn dead_endpoint() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{}/v2/everything", addr)).unwrap()
}

/// A two-article upstream response in the service's format.
pub fn two_articles() -> String {
    serde_json::json!({
        "status": "ok",
        "totalResults": 2,
        "articles": [
            {
                "source": {"id": null, "name": "First Wire"},
                "author": "A. Writer",
                "title": "First headline",
                "description": "first",
                "url": "https://example.com/a",
                "urlToImage": null,
                "publishedAt": "2025-03-07T12:00:00Z",
                "content": "first content"
            },
            {
                "source": {"id": "second", "name": "Second Daily"},
                "author": null,
                "title": "Second <headline>",
                "description": null,
                "url": "https://example.com/b?x=1&y=2",
                "urlToImage": null,
                "publishedAt": "2025-03-06T08:30:00Z",
                "content": null
            }
        ]
    })
    .to_string()
}

/// An upstream response with no articles.
pub fn no_articles() -> String {
    serde_json::json!({"status": "ok", "totalResults": 0, "articles": []}).to_string()
}
