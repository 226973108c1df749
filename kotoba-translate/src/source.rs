//! Trait definition for pluggable translation sources.
//!
//! Each source (Weblio, WordReference, Jisho, Wiktionary, LibreTranslate)
//! implements [`TranslationSource`] to provide a uniform interface for
//! fetching a payload and extracting raw candidates from it.

use crate::config::TranslateConfig;
use crate::error::TranslateError;
use crate::types::{Candidate, Payload, SourceId};

/// A pluggable translation source.
///
/// Implementors fetch one payload per lookup and extract unfiltered
/// [`Candidate`] strings from it. Each source handles its own:
///
/// - URL construction with term encoding
/// - HTTP request with appropriate headers
/// - Payload walking (JSON shape or HTML block signature)
///
/// Fetching is the only fallible step. Extraction never fails: a payload
/// of the wrong shape yields no candidates.
///
/// All implementations must be `Send + Sync` for concurrent lookups.
pub trait TranslationSource: Send + Sync {
    /// Fetch the raw payload for `term`.
    ///
    /// Makes exactly one outbound request; no retries.
    ///
    /// # Errors
    ///
    /// Returns [`TranslateError::Timeout`], [`TranslateError::Http`] or
    /// [`TranslateError::Parse`]; the orchestrator turns each into a
    /// non-`Ok` [`crate::types::SourceOutcome`].
    fn fetch(
        &self,
        term: &str,
        config: &TranslateConfig,
    ) -> impl std::future::Future<Output = Result<Payload, TranslateError>> + Send;

    /// Extract raw candidates from a payload, bounded by `limit`.
    fn extract(&self, payload: &Payload, limit: usize) -> Vec<Candidate>;

    /// Returns which [`SourceId`] this implementation represents.
    fn source_id(&self) -> SourceId;

    /// Returns the trust value used for ranking. Typically delegates to
    /// [`SourceId::trust()`].
    fn trust(&self) -> u8 {
        self.source_id().trust()
    }
}
