//! The `search` and `shell` commands.
//!
//! Both drive a [`SearchUi`] session against a [`Backend`]: either the
//! in-process relay (needs the key locally) or a remote relay server.

use crate::client::RemoteRelay;
use crate::config::Settings;
use crate::error::RelayError;
use crate::outputs::terminal;
use crate::relay::{ArticleSearch, NewsRelay};
use crate::ui::SearchUi;
use serde_json::Value;
use std::error::Error;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, instrument};

/// Where searches from the command line go.
#[derive(Debug)]
pub enum Backend {
    Local(NewsRelay),
    Remote(RemoteRelay),
}

impl Backend {
    /// Pick the remote relay when `relay_url` is given, the local one otherwise.
    pub fn from_settings(settings: &Settings, relay_url: Option<&str>) -> Result<Self, Box<dyn Error>> {
        match relay_url {
            Some(url) => {
                info!(%url, "Searching through remote relay");
                Ok(Backend::Remote(RemoteRelay::connect(url, settings.timeout)?))
            }
            None => {
                info!(endpoint = %settings.endpoint, "Searching through in-process relay");
                Ok(Backend::Local(NewsRelay::from_settings(settings)?))
            }
        }
    }
}

impl ArticleSearch for Backend {
    async fn search(&self, topic: &str) -> Result<Value, RelayError> {
        match self {
            Backend::Local(relay) => relay.handle(topic).await,
            Backend::Remote(relay) => relay.handle(topic).await,
        }
    }
}

/// Run one search and write the rendered session to `out`.
///
/// A blank topic writes the prompt instead and makes no call.
#[instrument(level = "info", skip_all)]
pub async fn run_search<S, W>(
    search: &S,
    topic: &str,
    json: bool,
    out: &mut W,
) -> Result<(), Box<dyn Error>>
where
    S: ArticleSearch,
    W: Write,
{
    let mut ui = SearchUi::new();
    ui.set_topic(topic);
    if let Err(refused) = ui.submit(search).await {
        writeln!(out, "{}", refused)?;
        return Ok(());
    }

    if json {
        writeln!(out, "{}", terminal::render_json(ui.state())?)?;
    } else {
        write!(out, "{}", terminal::render_text(ui.state()))?;
    }
    Ok(())
}

/// Read topics line by line from `input`, keeping one session for all of them.
///
/// Blank lines print the topic prompt. `quit` or `exit` ends the session.
#[instrument(level = "info", skip_all)]
pub async fn run_shell<S, R, W>(search: &S, input: R, out: &mut W) -> Result<(), Box<dyn Error>>
where
    S: ArticleSearch,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut ui = SearchUi::new();
    let mut lines = input.lines();

    write!(out, "topic> ")?;
    out.flush()?;
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line == "quit" || line == "exit" {
            break;
        }

        ui.set_topic(line);
        match ui.submit(search).await {
            Ok(phase) => {
                debug!(?phase, "Search finished");
                write!(out, "{}", terminal::render_text(ui.state()))?;
            }
            Err(refused) => writeln!(out, "{}", refused)?,
        }

        write!(out, "topic> ")?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}
