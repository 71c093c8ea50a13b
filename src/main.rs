//! # PulseByLan
//!
//! A news search client built around a credential-holding relay. The user
//! supplies a topic, the relay attaches the NewsAPI key and forwards the
//! search, and the article list comes back for rendering.
//!
//! ## Features
//!
//! - Relay server exposing `GET /api/news?topic=` with the key kept server-side
//! - Server-rendered search page at `/`
//! - One-shot `search` and interactive `shell` commands, either in-process or
//!   through a running relay
//!
//! ## Usage
//!
//! ```sh
//! NEWS_API_KEY=... pulse_news serve
//! pulse_news search --relay-url http://127.0.0.1:3000 rust
//! ```
//!
//! ## Architecture
//!
//! 1. **Config**: CLI, environment, and optional YAML resolved once into [`config::Settings`]
//! 2. **Relay**: [`relay::NewsRelay`] validates the topic, attaches the key, forwards one GET
//! 3. **Session**: [`ui::SearchUi`] moves through Idle → Loading → Success | Failure
//! 4. **Output**: HTML page or terminal text/JSON rendered from the session state

use clap::Parser;
use std::error::Error;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod client;
mod commands;
mod config;
mod error;
mod models;
mod outputs;
mod relay;
mod server;
#[cfg(test)]
mod testing;
mod ui;
mod utils;

use cli::{Cli, Command};
use commands::Backend;
use config::Settings;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // Logs go to stderr so `search --json` output stays clean on stdout.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(command = ?args.command, "Parsed CLI arguments");

    let settings = Settings::load(&args).await?;
    info!(endpoint = %settings.endpoint, has_key = settings.api_key.is_some(), "Configuration loaded");

    match args.command {
        Command::Serve => server::serve(&settings).await?,
        Command::Search {
            topic,
            relay_url,
            json,
        } => {
            let backend = Backend::from_settings(&settings, relay_url.as_deref())?;
            let mut stdout = std::io::stdout();
            commands::run_search(&backend, &topic.join(" "), json, &mut stdout).await?;
        }
        Command::Shell { relay_url } => {
            let backend = Backend::from_settings(&settings, relay_url.as_deref())?;
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            commands::run_shell(&backend, stdin, &mut stdout).await?;
        }
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, "Execution complete");
    Ok(())
}
