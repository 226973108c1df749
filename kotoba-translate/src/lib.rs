//! # kotoba-translate
//!
//! English to Japanese translation lookup aggregated across several
//! dictionary sources.
//!
//! A lookup queries every enabled source concurrently, extracts Japanese
//! candidates from each payload, drops page chrome and other noise,
//! merges identical translations, and returns a short ranked list. No API
//! keys are needed for the default sources.
//!
//! ## Design
//!
//! - Curated dictionaries (Weblio, WordReference) are scraped with CSS selectors
//! - Community dictionaries (Jisho, Wiktionary) are read from their JSON APIs
//! - Machine translation (LibreTranslate) is available as an opt-in fallback
//! - Every source has its own deadline; a slow or broken source contributes nothing
//! - Ranking prefers agreement between sources, then frequency, then source trust
//! - The same payloads always produce the same ranking, whatever order they arrive in
//!
//! ## Security
//!
//! - No network listeners; this is a library, not a server
//! - Lookup terms are logged only at trace level

pub mod config;
pub mod error;
pub mod extract;
pub mod filter;
pub mod http;
pub mod orchestrator;
pub mod source;
pub mod sources;
pub mod types;

pub use config::{SourceEndpoints, TranslateConfig};
pub use error::{Result, TranslateError};
pub use source::TranslationSource;
pub use types::{LookupRequest, RankedResult, Section, SourceId, Term, MAX_LIMIT};

/// Look up Japanese translations of an English term.
///
/// Queries all sources enabled in `config`, filters and merges their
/// candidates, and returns at most `limit` terms, best first.
///
/// # Errors
///
/// Returns [`TranslateError::Config`] if `config` is invalid, or
/// [`TranslateError::InvalidRequest`] if `term` is blank or `limit` is
/// outside `1..=10`. Source failures never surface here: if every source
/// fails the result is empty.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> kotoba_translate::Result<()> {
/// let config = kotoba_translate::TranslateConfig::default();
/// let result = kotoba_translate::lookup("cat", 5, &config).await?;
/// for term in &result.terms {
///     println!("{} ({} sources)", term.text, term.sources.len());
/// }
/// # Ok(())
/// # }
/// ```
pub async fn lookup(term: &str, limit: usize, config: &TranslateConfig) -> Result<RankedResult> {
    config.validate()?;
    let request = LookupRequest::new(term, limit)?;
    tracing::trace!(term = request.term(), limit, "lookup");
    Ok(orchestrator::lookup::orchestrate_lookup(&request, config).await)
}

/// Look up translations with the default configuration.
///
/// Convenience wrapper around [`lookup`] using [`TranslateConfig::default()`].
///
/// # Errors
///
/// Same as [`lookup`].
pub async fn lookup_default(term: &str, limit: usize) -> Result<RankedResult> {
    lookup(term, limit, &TranslateConfig::default()).await
}
