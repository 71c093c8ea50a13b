//! HTML rendering of the search page.
//!
//! The page is a single form that submits `GET /?topic=...` back to the relay
//! server, followed by one display mode:
//!
//! - the error message, when the last search failed
//! - the article list, each title linking out in a new tab with its publish date
//!   (titles whose URL is not http(s) are shown without a link)
//! - an empty-state prompt otherwise
//!
//! Every piece of upstream or user text is escaped with [`escape_html`].

use crate::ui::{NO_NEWS_YET_PROMPT, SearchState, SubmitError};
use crate::utils::{escape_html, local_published_date};
use std::fmt::Write;
use url::Url;

const PAGE_TITLE: &str = "PulseByLan";
const LOADING_PROMPT: &str = "Fetching news...";

const STYLE: &str = "body{font-family:sans-serif;background:#f3f4f6;display:flex;flex-direction:column;align-items:center;padding:2rem}\
form{display:flex;width:100%;max-width:32rem;margin-bottom:1.5rem}\
input{flex-grow:1;padding:.75rem}\
ul{list-style:none;padding:0;width:100%;max-width:32rem}\
li{background:#fff;padding:1rem;margin-bottom:1rem;border-radius:.375rem}\
.error{color:#dc2626}.prompt{color:#b45309}.published{color:#6b7280;font-size:.875rem}";

/// Render the full search page for `state`.
///
/// `notice` carries a local submit refusal (blank topic, busy) to show above
/// the results without disturbing them.
pub fn render_page(state: &SearchState, notice: Option<SubmitError>) -> String {
    let mut html = String::new();

    writeln!(html, "<!DOCTYPE html>").unwrap();
    writeln!(html, "<html lang=\"en\">").unwrap();
    writeln!(html, "<head>").unwrap();
    writeln!(html, "<meta charset=\"utf-8\">").unwrap();
    writeln!(html, "<title>{}</title>", PAGE_TITLE).unwrap();
    writeln!(html, "<style>{}</style>", STYLE).unwrap();
    writeln!(html, "</head>").unwrap();
    writeln!(html, "<body>").unwrap();
    writeln!(html, "<h1>&#127800; {}</h1>", PAGE_TITLE).unwrap();

    html.push_str(&render_form(state));

    if let Some(notice) = notice {
        writeln!(
            html,
            "<p class=\"prompt\" role=\"alert\">{}</p>",
            escape_html(&notice.to_string())
        )
        .unwrap();
    }

    html.push_str(&render_results(state));

    writeln!(html, "</body>").unwrap();
    writeln!(html, "</html>").unwrap();
    html
}

fn render_form(state: &SearchState) -> String {
    let (disabled, label) = if state.loading {
        (" disabled", "Loading...")
    } else {
        ("", "Search")
    };

    let mut form = String::new();
    writeln!(form, "<form method=\"get\" action=\"/\">").unwrap();
    writeln!(
        form,
        "<input type=\"text\" name=\"topic\" value=\"{}\" placeholder=\"Enter a topic (e.g., technology)\">",
        escape_html(&state.topic)
    )
    .unwrap();
    writeln!(form, "<button type=\"submit\"{}>{}</button>", disabled, label).unwrap();
    writeln!(form, "</form>").unwrap();
    form
}

/// Whether `raw` is safe to put in an `href`: an absolute http(s) URL.
fn is_web_link(raw: &str) -> bool {
    Url::parse(raw).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

/// Render the single display mode for `state`.
pub fn render_results(state: &SearchState) -> String {
    let mut out = String::new();

    if let Some(error) = &state.error {
        writeln!(out, "<p class=\"error\">{}</p>", escape_html(error)).unwrap();
    } else if !state.results.is_empty() {
        writeln!(out, "<ul>").unwrap();
        for article in &state.results {
            writeln!(out, "<li>").unwrap();
            if is_web_link(&article.url) {
                writeln!(
                    out,
                    "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
                    escape_html(&article.url),
                    escape_html(&article.title)
                )
                .unwrap();
            } else {
                writeln!(
                    out,
                    "<span class=\"title\">{}</span>",
                    escape_html(&article.title)
                )
                .unwrap();
            }
            writeln!(
                out,
                "<p class=\"published\">Published: {}</p>",
                escape_html(&local_published_date(&article.published_at))
            )
            .unwrap();
            writeln!(out, "</li>").unwrap();
        }
        writeln!(out, "</ul>").unwrap();
    } else {
        let prompt = if state.loading {
            LOADING_PROMPT
        } else {
            NO_NEWS_YET_PROMPT
        };
        writeln!(out, "<p>{}</p>", prompt).unwrap();
    }

    out
}
