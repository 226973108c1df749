//! Lookup configuration with sensible defaults.
//!
//! [`TranslateConfig`] controls which sources are queried, the per-source
//! deadline, the client identity sent to scraped pages, and where each
//! source lives. Every field has a default, so a partial TOML section
//! deserialises cleanly.

use serde::{Deserialize, Serialize};

use crate::error::TranslateError;
use crate::types::SourceId;

/// Base URLs for every source. Overridable so tests can point sources at
/// a local mock server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceEndpoints {
    /// Weblio content pages; the term is appended as a path segment.
    pub weblio: String,
    /// WordReference English-Japanese pages; the term is appended as a path segment.
    pub word_reference: String,
    /// Jisho word search API; the term is sent as `keyword`.
    pub jisho: String,
    /// wiktextract word endpoint; the term is appended as a path segment.
    pub wiktionary: String,
    /// LibreTranslate `/translate` endpoint.
    pub libre_translate: String,
}

impl Default for SourceEndpoints {
    fn default() -> Self {
        Self {
            weblio: "https://ejje.weblio.jp/content".into(),
            word_reference: "https://www.wordreference.com/enja".into(),
            jisho: "https://jisho.org/api/v1/search/words".into(),
            wiktionary: "https://api.wiktextract.com/en/word".into(),
            libre_translate: "https://libretranslate.com/translate".into(),
        }
    }
}

impl SourceEndpoints {
    /// Base URL configured for `source`.
    pub fn for_source(&self, source: SourceId) -> &str {
        match source {
            SourceId::Weblio => &self.weblio,
            SourceId::WordReference => &self.word_reference,
            SourceId::Jisho => &self.jisho,
            SourceId::Wiktionary => &self.wiktionary,
            SourceId::LibreTranslate => &self.libre_translate,
        }
    }

    /// Point every source at the same base URL, keeping each source's
    /// default path. Used to aim all sources at one mock server.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            weblio: format!("{base}/content"),
            word_reference: format!("{base}/enja"),
            jisho: format!("{base}/api/v1/search/words"),
            wiktionary: format!("{base}/en/word"),
            libre_translate: format!("{base}/translate"),
        }
    }
}

/// Configuration for a translation lookup.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateConfig {
    /// Which sources to query. Queried concurrently; results are merged.
    pub sources: Vec<SourceId>,
    /// Per-source deadline in seconds. Each source gets exactly one attempt.
    pub timeout_seconds: u64,
    /// Custom User-Agent string. If `None`, rotates through a built-in list
    /// of realistic browser User-Agents.
    pub user_agent: Option<String>,
    /// Where each source lives.
    pub endpoints: SourceEndpoints,
    /// API key for LibreTranslate instances that require one.
    pub libre_api_key: Option<String>,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            sources: vec![
                SourceId::Weblio,
                SourceId::WordReference,
                SourceId::Jisho,
                SourceId::Wiktionary,
            ],
            timeout_seconds: 6,
            user_agent: None,
            endpoints: SourceEndpoints::default(),
            libre_api_key: None,
        }
    }
}

impl TranslateConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `timeout_seconds` must be greater than 0
    /// - `sources` must not be empty
    /// - every enabled source must have a non-empty endpoint
    pub fn validate(&self) -> Result<(), TranslateError> {
        if self.timeout_seconds == 0 {
            return Err(TranslateError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.sources.is_empty() {
            return Err(TranslateError::Config(
                "at least one source must be enabled".into(),
            ));
        }
        for source in &self.sources {
            if self.endpoints.for_source(*source).trim().is_empty() {
                return Err(TranslateError::Config(format!(
                    "endpoint for {source} must not be empty"
                )));
            }
        }
        Ok(())
    }
}
