//! Core types for lookup requests, source outcomes and aggregated terms.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TranslateError;

/// Largest `limit` a caller may request.
pub const MAX_LIMIT: usize = 10;

/// A validated translation lookup.
///
/// Immutable once constructed; [`LookupRequest::new`] is the only way in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    term: String,
    limit: usize,
}

impl LookupRequest {
    /// Validate and build a request.
    ///
    /// # Errors
    ///
    /// Returns [`TranslateError::InvalidRequest`] if `term` is empty after
    /// trimming or `limit` is outside `1..=10`.
    pub fn new(term: &str, limit: usize) -> Result<Self, TranslateError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(TranslateError::InvalidRequest(
                "term must not be empty".into(),
            ));
        }
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(TranslateError::InvalidRequest(format!(
                "limit must be between 1 and {MAX_LIMIT}, got {limit}"
            )));
        }
        Ok(Self {
            term: term.to_owned(),
            limit,
        })
    }

    /// The trimmed English headword.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Maximum number of translations to return.
    pub fn limit(&self) -> usize {
        self.limit
    }
}

/// External dictionary and translation providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceId {
    /// Weblio English-Japanese dictionary pages, curated and scraped.
    Weblio,
    /// WordReference English-Japanese pages, scraped.
    WordReference,
    /// Jisho word search API (JMdict backed).
    Jisho,
    /// Wiktionary translation tables via a wiktextract JSON endpoint.
    Wiktionary,
    /// LibreTranslate machine translation, last resort.
    LibreTranslate,
}

/// Whether a source is a main contributor or only tops up the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceTier {
    /// May contribute up to `limit * 2` accepted candidates.
    Primary,
    /// May contribute up to `limit` accepted candidates.
    Supplementary,
}

impl SourceId {
    /// Returns the human-readable name of this source.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Weblio => "Weblio",
            Self::WordReference => "WordReference",
            Self::Jisho => "Jisho",
            Self::Wiktionary => "Wiktionary",
            Self::LibreTranslate => "LibreTranslate",
        }
    }

    /// Fixed trust value used as a ranking key. Higher is more trusted.
    pub fn trust(&self) -> u8 {
        match self {
            Self::Weblio => 5,
            Self::WordReference => 4,
            Self::Jisho => 3,
            Self::Wiktionary => 2,
            Self::LibreTranslate => 1,
        }
    }

    /// Intake tier of this source.
    pub fn tier(&self) -> SourceTier {
        match self {
            Self::Weblio | Self::Jisho => SourceTier::Primary,
            Self::WordReference | Self::Wiktionary | Self::LibreTranslate => {
                SourceTier::Supplementary
            }
        }
    }

    /// Whether this source is a scraped HTML page rather than an API.
    pub fn is_scraped(&self) -> bool {
        matches!(self, Self::Weblio | Self::WordReference)
    }

    /// Maximum accepted candidates this source may fold for a given limit.
    pub fn intake_cap(&self, limit: usize) -> usize {
        match self.tier() {
            SourceTier::Primary => limit * 2,
            SourceTier::Supplementary => limit,
        }
    }

    /// Returns all available source variants.
    pub fn all() -> &'static [SourceId] {
        &[
            Self::Weblio,
            Self::WordReference,
            Self::Jisho,
            Self::Wiktionary,
            Self::LibreTranslate,
        ]
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which part of a source's result a candidate came from.
///
/// Declared so that `Primary < Secondary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Main results.
    Primary,
    /// "Additional translations" and other lower-confidence sections.
    Secondary,
}

/// Raw payload returned by a source client.
#[derive(Debug, Clone)]
pub enum Payload {
    /// An HTML page body.
    Html(String),
    /// A decoded JSON document.
    Json(serde_json::Value),
}

/// Terminal outcome of one source fetch. Every variant other than `Ok`
/// means "no candidates from this source".
#[derive(Debug, Clone)]
pub enum SourceOutcome {
    /// The source answered with a payload.
    Ok(Payload),
    /// The per-source deadline expired.
    Timeout,
    /// Transport failure or non-success status (`None` when no response).
    HttpError(Option<u16>),
    /// The response body could not be decoded.
    ParseError(String),
}

impl SourceOutcome {
    /// Short status label for logging.
    pub fn status(&self) -> &'static str {
        match self {
            Self::Ok(_) => "ok",
            Self::Timeout => "timeout",
            Self::HttpError(_) => "http_error",
            Self::ParseError(_) => "parse_error",
        }
    }

    /// Returns `true` if the source produced a payload.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }
}

impl From<TranslateError> for SourceOutcome {
    fn from(err: TranslateError) -> Self {
        match err {
            TranslateError::Timeout(_) => Self::Timeout,
            TranslateError::Http { status, .. } => Self::HttpError(status),
            other => Self::ParseError(other.to_string()),
        }
    }
}

/// One source's result for one lookup. Owned by the orchestrator and
/// dropped when the lookup completes.
#[derive(Debug, Clone)]
pub struct SourceResult {
    /// Which source produced this result.
    pub source: SourceId,
    /// What happened.
    pub outcome: SourceOutcome,
}

/// A single unfiltered string extracted from a source payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Extracted text before normalisation.
    pub raw_text: String,
    /// Source that produced the text.
    pub source: SourceId,
    /// Section of the source's result the text came from.
    pub section: Section,
}

impl Candidate {
    /// Build a candidate from the main section of a source.
    pub fn primary(raw_text: impl Into<String>, source: SourceId) -> Self {
        Self {
            raw_text: raw_text.into(),
            source,
            section: Section::Primary,
        }
    }

    /// Build a candidate with an explicit section.
    pub fn with_section(raw_text: impl Into<String>, source: SourceId, section: Section) -> Self {
        Self {
            raw_text: raw_text.into(),
            source,
            section,
        }
    }
}

/// A deduplicated, filtered translation with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Term {
    /// Normalised translation text; the aggregation key.
    pub text: String,
    /// Distinct sources that produced this text, in fold order.
    pub sources: Vec<SourceId>,
    /// Total number of times the text was folded, across all sources.
    pub occurrence_count: u32,
    /// Highest trust among contributing sources.
    pub best_trust: u8,
    /// Best section the text appeared in.
    pub best_section: Section,
    /// Position at which the text was first folded.
    pub first_seen: usize,
}

/// Terminal output of one lookup: at most `limit` terms, best first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RankedResult {
    /// Ranked terms with provenance.
    pub terms: Vec<Term>,
}

impl RankedResult {
    /// The ranked translation strings.
    pub fn texts(&self) -> Vec<String> {
        self.terms.iter().map(|t| t.text.clone()).collect()
    }

    /// Number of ranked terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns `true` if no translation survived.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
