//! Renderers for a search session.
//!
//! Each submodule turns a [`crate::ui::SearchState`] into one output format:
//!
//! # Submodules
//!
//! - [`html`]: The search page served at `/`
//! - [`terminal`]: Plain text for the `search` and `shell` commands, plus a JSON mode
//!
//! All renderers show exactly one of three display modes: the error message,
//! the article list, or the empty-state prompt.

pub mod html;
pub mod terminal;
