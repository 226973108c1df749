//! Deterministic ranking of aggregated terms.
//!
//! Order, best first:
//!
//! 1. number of distinct contributing sources (more is better)
//! 2. total occurrence count (more is better)
//! 3. best contributing trust, then primary section before secondary
//! 4. first-seen position (earlier is better)
//!
//! `first_seen` is unique per term, so the order is total and the output
//! depends only on the terms, never on fetch completion order.

use std::cmp::Ordering;

use crate::types::{RankedResult, Term};

/// Compare two terms; `Less` means `a` ranks above `b`.
pub fn compare(a: &Term, b: &Term) -> Ordering {
    b.sources
        .len()
        .cmp(&a.sources.len())
        .then_with(|| b.occurrence_count.cmp(&a.occurrence_count))
        .then_with(|| b.best_trust.cmp(&a.best_trust))
        .then_with(|| a.best_section.cmp(&b.best_section))
        .then_with(|| a.first_seen.cmp(&b.first_seen))
}

/// Sort `terms` and keep the best `limit`.
pub fn rank(mut terms: Vec<Term>, limit: usize) -> RankedResult {
    terms.sort_by(compare);
    terms.truncate(limit);
    RankedResult { terms }
}
