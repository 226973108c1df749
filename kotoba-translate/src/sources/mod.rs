//! Translation source implementations.
//!
//! Each module provides a struct implementing
//! [`crate::source::TranslationSource`] for one external dictionary or
//! translation provider. [`SourceClient`] dispatches over all of them so
//! the orchestrator can hold a homogeneous list.

pub mod jisho;
pub mod libre;
pub mod weblio;
pub mod wiktionary;
pub mod wordreference;

pub use jisho::JishoSource;
pub use libre::LibreTranslateSource;
pub use weblio::WeblioSource;
pub use wiktionary::WiktionarySource;
pub use wordreference::WordReferenceSource;

use crate::config::TranslateConfig;
use crate::error::TranslateError;
use crate::source::TranslationSource;
use crate::types::{Candidate, Payload, SourceId};

/// Any built-in source.
pub enum SourceClient {
    /// Weblio page scraper.
    Weblio(WeblioSource),
    /// WordReference page scraper.
    WordReference(WordReferenceSource),
    /// Jisho API client.
    Jisho(JishoSource),
    /// Wiktionary API client.
    Wiktionary(WiktionarySource),
    /// LibreTranslate API client.
    LibreTranslate(LibreTranslateSource),
}

impl SourceClient {
    /// The built-in implementation for `source`.
    pub fn new(source: SourceId) -> Self {
        match source {
            SourceId::Weblio => Self::Weblio(WeblioSource),
            SourceId::WordReference => Self::WordReference(WordReferenceSource),
            SourceId::Jisho => Self::Jisho(JishoSource),
            SourceId::Wiktionary => Self::Wiktionary(WiktionarySource),
            SourceId::LibreTranslate => Self::LibreTranslate(LibreTranslateSource),
        }
    }
}

impl TranslationSource for SourceClient {
    async fn fetch(&self, term: &str, config: &TranslateConfig) -> Result<Payload, TranslateError> {
        match self {
            Self::Weblio(s) => s.fetch(term, config).await,
            Self::WordReference(s) => s.fetch(term, config).await,
            Self::Jisho(s) => s.fetch(term, config).await,
            Self::Wiktionary(s) => s.fetch(term, config).await,
            Self::LibreTranslate(s) => s.fetch(term, config).await,
        }
    }

    fn extract(&self, payload: &Payload, limit: usize) -> Vec<Candidate> {
        match self {
            Self::Weblio(s) => s.extract(payload, limit),
            Self::WordReference(s) => s.extract(payload, limit),
            Self::Jisho(s) => s.extract(payload, limit),
            Self::Wiktionary(s) => s.extract(payload, limit),
            Self::LibreTranslate(s) => s.extract(payload, limit),
        }
    }

    fn source_id(&self) -> SourceId {
        match self {
            Self::Weblio(s) => s.source_id(),
            Self::WordReference(s) => s.source_id(),
            Self::Jisho(s) => s.source_id(),
            Self::Wiktionary(s) => s.source_id(),
            Self::LibreTranslate(s) => s.source_id(),
        }
    }
}
