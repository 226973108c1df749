//! Candidate aggregation by normalised text.
//!
//! Folds filtered candidates into one [`Term`] per distinct text, tracking
//! which sources produced it and how often. The fold is commutative for
//! everything the ranker sorts on except `first_seen`, which only breaks
//! ties.

use std::collections::HashMap;

use crate::filter;
use crate::types::{Candidate, Section, SourceId, Term};

/// Per-source intake summary, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FoldStats {
    /// Candidates folded into a term.
    pub accepted: usize,
    /// Candidates discarded by the filter.
    pub rejected: usize,
    /// Candidates left unread after the source hit its intake cap.
    pub capped: usize,
}

/// Request-scoped map from normalised text to [`Term`].
///
/// Owned by a single lookup; never shared across lookups or tasks.
#[derive(Debug, Default)]
pub struct Aggregator {
    terms: Vec<Term>,
    index: HashMap<String, usize>,
}

impl Aggregator {
    /// Create an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one already-cleaned text.
    ///
    /// First sight creates a term with `occurrence_count = 1`; repeats bump
    /// the count, add the source, and keep the best trust and section.
    pub fn fold(&mut self, text: String, source: SourceId, section: Section) {
        let trust = source.trust();
        if let Some(&i) = self.index.get(&text) {
            let term = &mut self.terms[i];
            term.occurrence_count += 1;
            if !term.sources.contains(&source) {
                term.sources.push(source);
            }
            if (trust, std::cmp::Reverse(section)) > (term.best_trust, std::cmp::Reverse(term.best_section)) {
                term.best_trust = trust;
                term.best_section = section;
            }
            return;
        }

        let first_seen = self.terms.len();
        self.index.insert(text.clone(), first_seen);
        self.terms.push(Term {
            text,
            sources: vec![source],
            occurrence_count: 1,
            best_trust: trust,
            best_section: section,
            first_seen,
        });
    }

    /// Filter and fold one source's candidates, stopping once the source
    /// has contributed `cap` accepted candidates.
    pub fn fold_source(
        &mut self,
        source: SourceId,
        candidates: impl IntoIterator<Item = Candidate>,
        cap: usize,
    ) -> FoldStats {
        let mut stats = FoldStats::default();
        for candidate in candidates {
            if stats.accepted >= cap {
                stats.capped += 1;
                continue;
            }
            match filter::clean(&candidate) {
                Ok(text) => {
                    self.fold(text, source, candidate.section);
                    stats.accepted += 1;
                }
                Err(reason) => {
                    tracing::trace!(%source, ?reason, raw = %candidate.raw_text, "candidate rejected");
                    stats.rejected += 1;
                }
            }
        }
        stats
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns `true` if nothing has been folded.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Finish aggregation, returning terms in first-fold order.
    pub fn into_terms(self) -> Vec<Term> {
        self.terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(source: SourceId, words: &[&str]) -> Vec<Candidate> {
        words.iter().map(|w| Candidate::primary(*w, source)).collect()
    }

    #[test]
    fn unique_texts_pass_through() {
        let mut agg = Aggregator::new();
        agg.fold("猫".into(), SourceId::Jisho, Section::Primary);
        agg.fold("犬".into(), SourceId::Jisho, Section::Primary);
        assert_eq!(agg.len(), 2);
    }

    #[test]
    fn repeat_sight_increments_and_tracks_sources() {
        let mut agg = Aggregator::new();
        agg.fold("猫".into(), SourceId::Jisho, Section::Primary);
        agg.fold("猫".into(), SourceId::Weblio, Section::Primary);
        agg.fold("猫".into(), SourceId::Weblio, Section::Primary);

        let terms = agg.into_terms();
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].occurrence_count, 3);
        // Weblio listed once despite two sightings.
        assert_eq!(terms[0].sources, vec![SourceId::Jisho, SourceId::Weblio]);
    }

    #[test]
    fn best_trust_and_section_kept() {
        let mut agg = Aggregator::new();
        agg.fold("やつ".into(), SourceId::Wiktionary, Section::Secondary);
        agg.fold("やつ".into(), SourceId::WordReference, Section::Secondary);
        agg.fold("やつ".into(), SourceId::Wiktionary, Section::Primary);

        let term = &agg.into_terms()[0];
        assert_eq!(term.best_trust, SourceId::WordReference.trust());
        assert_eq!(term.best_section, Section::Secondary);
    }

    #[test]
    fn primary_section_wins_at_equal_trust() {
        let mut agg = Aggregator::new();
        agg.fold("やつ".into(), SourceId::Wiktionary, Section::Secondary);
        agg.fold("やつ".into(), SourceId::Wiktionary, Section::Primary);
        assert_eq!(agg.into_terms()[0].best_section, Section::Primary);
    }

    #[test]
    fn first_seen_follows_fold_order() {
        let mut agg = Aggregator::new();
        agg.fold("一".into(), SourceId::Jisho, Section::Primary);
        agg.fold("二".into(), SourceId::Jisho, Section::Primary);
        agg.fold("一".into(), SourceId::Weblio, Section::Primary);
        let terms = agg.into_terms();
        assert_eq!(terms[0].first_seen, 0);
        assert_eq!(terms[1].first_seen, 1);
    }

    #[test]
    fn fold_source_filters_boilerplate() {
        let mut agg = Aggregator::new();
        let stats = agg.fold_source(
            SourceId::Weblio,
            candidates(SourceId::Weblio, &["猫", "ネコ", "宣伝", "Login", "copyright 猫"]),
            10,
        );
        assert_eq!(stats.accepted, 2);
        assert_eq!(stats.rejected, 3);
        let texts: Vec<String> = agg.into_terms().into_iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["猫", "ネコ"]);
    }

    #[test]
    fn fold_source_respects_cap() {
        let mut agg = Aggregator::new();
        let stats = agg.fold_source(
            SourceId::Wiktionary,
            candidates(SourceId::Wiktionary, &["一", "cat", "二", "三", "四"]),
            2,
        );
        assert_eq!(stats.accepted, 2);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.capped, 2);
        assert_eq!(agg.len(), 2);
    }

    #[test]
    fn normalisation_merges_equivalent_texts() {
        let mut agg = Aggregator::new();
        agg.fold_source(SourceId::Weblio, candidates(SourceId::Weblio, &["・猫"]), 5);
        agg.fold_source(SourceId::Jisho, candidates(SourceId::Jisho, &[" 猫 "]), 5);
        let terms = agg.into_terms();
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].sources.len(), 2);
    }

    #[test]
    fn empty_input_returns_empty() {
        let mut agg = Aggregator::new();
        let stats = agg.fold_source(SourceId::Jisho, Vec::new(), 5);
        assert_eq!(stats, FoldStats::default());
        assert!(agg.is_empty());
    }
}
