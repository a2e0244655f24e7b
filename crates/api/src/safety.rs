//! Redaction helpers for anything that may end up in logs or tool output.
//!
//! The access token travels in a header and never appears in a URL, but proxies configured via
//! `GOCARDLESS_BASE_URL` may carry userinfo, and list filters land in the query string.

use url::{Position, Url};

/// Scheme, host, port and path of a URL; userinfo, query and fragment are dropped.
#[must_use]
pub fn redact_url(url: &Url) -> String {
    format!(
        "{}://{}",
        url.scheme(),
        &url[Position::BeforeHost..Position::AfterPath]
    )
}

/// Render a reqwest error with the request URL redacted.
#[must_use]
pub fn sanitize_reqwest_error(e: &reqwest::Error) -> String {
    let text = e.to_string();
    match e.url() {
        Some(url) => text.replace(url.as_str(), &redact_url(url)),
        None => text,
    }
}
