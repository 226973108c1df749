//! Shared HTTP plumbing for source clients.
//!
//! Provides a configured [`reqwest::Client`] per source, with browser-like
//! User-Agent rotation for scraped pages, plus small helpers that turn a
//! response into a payload or a typed [`TranslateError`].

use crate::config::TranslateConfig;
use crate::error::TranslateError;
use crate::types::SourceId;
use rand::seq::SliceRandom;
use std::time::Duration;
use url::Url;

/// Realistic browser User-Agent strings, rotated per request.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) Gecko/20100101 Firefox/133.0",
];

/// User-Agent sent to structured APIs, which prefer an honest client name.
const API_USER_AGENT: &str = concat!("kotoba-translate/", env!("CARGO_PKG_VERSION"));

/// Build a [`reqwest::Client`] for one source request.
///
/// The client has:
/// - Timeout from config (the source's only attempt)
/// - A random browser User-Agent for scraped sources, an API client name
///   otherwise (or the configured override for both)
/// - Brotli and gzip decompression
///
/// # Errors
///
/// Returns [`TranslateError::Config`] if the client cannot be constructed.
pub fn build_client(
    config: &TranslateConfig,
    source: SourceId,
) -> Result<reqwest::Client, TranslateError> {
    let ua = match config.user_agent {
        Some(ref custom) => custom.clone(),
        None if source.is_scraped() => random_user_agent().to_owned(),
        None => API_USER_AGENT.to_owned(),
    };

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(|e| TranslateError::Config(format!("failed to build HTTP client: {e}")))
}

/// Select a random User-Agent string from the rotation list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        // SAFETY: USER_AGENTS is a non-empty const array, choose only returns None on empty slices
        .unwrap_or(USER_AGENTS[0])
}

/// Append `term` to `base` as a single, percent-encoded path segment.
///
/// # Errors
///
/// Returns [`TranslateError::Config`] if `base` is not a valid absolute URL.
pub fn url_with_segment(base: &str, term: &str) -> Result<Url, TranslateError> {
    let mut url = parse_base(base)?;
    url.path_segments_mut()
        .map_err(|()| TranslateError::Config(format!("endpoint cannot take a path: {base}")))?
        .pop_if_empty()
        .push(term);
    Ok(url)
}

/// Append a single query parameter to `base`.
///
/// # Errors
///
/// Returns [`TranslateError::Config`] if `base` is not a valid absolute URL.
pub fn url_with_query(base: &str, key: &str, value: &str) -> Result<Url, TranslateError> {
    let mut url = parse_base(base)?;
    url.query_pairs_mut().append_pair(key, value);
    Ok(url)
}

fn parse_base(base: &str) -> Result<Url, TranslateError> {
    Url::parse(base).map_err(|e| TranslateError::Config(format!("invalid endpoint {base}: {e}")))
}

/// Send a prepared request and return the body of a successful response.
///
/// # Errors
///
/// Returns [`TranslateError::Timeout`] on deadline expiry and
/// [`TranslateError::Http`] on transport failure or non-success status.
pub async fn send_for_text(
    source: SourceId,
    request: reqwest::RequestBuilder,
) -> Result<String, TranslateError> {
    let response = request
        .send()
        .await
        .map_err(|e| TranslateError::from_reqwest(source.name(), e))?
        .error_for_status()
        .map_err(|e| TranslateError::from_reqwest(source.name(), e))?;

    let body = response
        .text()
        .await
        .map_err(|e| TranslateError::from_reqwest(source.name(), e))?;

    tracing::trace!(%source, bytes = body.len(), "response received");
    Ok(body)
}

/// Send a prepared request and decode the body of a successful response as JSON.
///
/// # Errors
///
/// Same as [`send_for_text`], plus [`TranslateError::Parse`] if the body is
/// not valid JSON.
pub async fn send_for_json(
    source: SourceId,
    request: reqwest::RequestBuilder,
) -> Result<serde_json::Value, TranslateError> {
    let body = send_for_text(source, request).await?;
    serde_json::from_str(&body)
        .map_err(|e| TranslateError::Parse(format!("{source} returned invalid JSON: {e}")))
}
