//! HTTP surface of the relay.
//!
//! # Routes
//!
//! | Route | Handler | Notes |
//! |-------|---------|-------|
//! | `GET /api/news?topic=` | [`news`] | Upstream JSON, or `{"error": ...}` with 400/500/502 |
//! | `GET /news?topic=` | [`news`] | Alias of the above |
//! | `GET /?topic=` | [`search_page`] | Server-rendered search page |
//! | `GET /health` | [`health`] | Liveness |
//!
//! The relay is the router state; every request runs independently against it.

use crate::config::Settings;
use crate::error::RelayError;
use crate::outputs::html;
use crate::relay::NewsRelay;
use crate::ui::SearchUi;
use axum::{
    Json, Router,
    extract::{Query, State},
    response::Html,
    routing::get,
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::error::Error;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument};

/// Query string accepted by the news and page routes.
#[derive(Debug, Deserialize)]
pub struct TopicQuery {
    pub topic: Option<String>,
}

/// Build the application router around `relay`.
pub fn router(relay: NewsRelay) -> Router {
    Router::new()
        .route("/", get(search_page))
        .route("/api/news", get(news))
        .route("/news", get(news))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(relay)
}

/// Relay a topic search and return the upstream body untouched.
pub async fn news(
    State(relay): State<NewsRelay>,
    Query(query): Query<TopicQuery>,
) -> Result<Json<Value>, RelayError> {
    let topic = query.topic.unwrap_or_default();
    relay.handle(&topic).await.map(Json)
}

/// Render the search page, running one search session when a topic was submitted.
pub async fn search_page(
    State(relay): State<NewsRelay>,
    Query(query): Query<TopicQuery>,
) -> Html<String> {
    let mut ui = SearchUi::new();
    let mut notice = None;

    if let Some(topic) = query.topic {
        ui.set_topic(topic);
        if let Err(refused) = ui.submit(&relay).await {
            notice = Some(refused);
        }
    }

    Html(html::render_page(ui.state(), notice))
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Bind to the configured address and serve until Ctrl+C or SIGTERM.
#[instrument(level = "info", skip_all, fields(bind = %settings.bind))]
pub async fn serve(settings: &Settings) -> Result<(), Box<dyn Error>> {
    let relay = NewsRelay::from_settings(settings)?;
    let listener = TcpListener::bind(settings.bind).await?;
    info!(addr = %listener.local_addr()?, endpoint = %settings.endpoint, "Relay server listening");

    axum::serve(listener, router(relay))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Relay server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
