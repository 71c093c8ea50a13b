//! Command-line interface definitions for PulseByLan.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Global options can be given before or after the subcommand, and the
//! credential and endpoint fall back to environment variables.

use clap::{Parser, Subcommand};

/// Command-line arguments for the application.
///
/// # Examples
///
/// ```sh
/// # Run the relay server with the key from the environment
/// NEWS_API_KEY=... pulse_news serve --bind 0.0.0.0:8080
///
/// # One-off search straight against the news service
/// pulse_news search climate change
///
/// # Search through a running relay, without holding the key locally
/// pulse_news search --relay-url http://localhost:3000 climate change
///
/// # Interactive session
/// pulse_news shell
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// NewsAPI key, only ever sent on the outbound leg
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Article search endpoint
    #[arg(long, env = "NEWS_API_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Address the relay server listens on
    #[arg(long, global = true)]
    pub bind: Option<String>,

    /// Timeout in seconds for each outbound request
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the relay server and search page
    Serve,

    /// Search once and print the results
    Search {
        /// Topic to search for; multiple words are joined with spaces
        topic: Vec<String>,

        /// Use a running relay server instead of calling the news service directly
        #[arg(long)]
        relay_url: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Read topics from stdin, one search per line
    Shell {
        /// Use a running relay server instead of calling the news service directly
        #[arg(long)]
        relay_url: Option<String>,
    },
}
