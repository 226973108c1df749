//! Structured-API extraction helpers.
//!
//! Dictionary APIs return nested JSON (entries → sub-entries → term
//! fields). Source modules walk their own shape with these helpers, which
//! bound the walk to a prefix of the entries and stop once enough raw
//! candidates are collected.

use serde_json::Value;

use crate::types::{Candidate, Section, SourceId};

/// Only the first `MAX_ENTRIES` top-level entries of a payload are read.
pub const MAX_ENTRIES: usize = 10;

/// Collects raw candidates up to a fixed budget.
#[derive(Debug)]
pub struct CandidateCollector {
    source: SourceId,
    budget: usize,
    candidates: Vec<Candidate>,
}

impl CandidateCollector {
    /// Collector for `source` that stops at `limit * 2` candidates,
    /// leaving headroom for later filtering.
    pub fn for_limit(source: SourceId, limit: usize) -> Self {
        Self {
            source,
            budget: limit.saturating_mul(2),
            candidates: Vec::new(),
        }
    }

    /// Record a candidate if there is room and the text is non-empty.
    pub fn push(&mut self, text: &str, section: Section) {
        let text = text.trim();
        if text.is_empty() || self.is_full() {
            return;
        }
        self.candidates
            .push(Candidate::with_section(text, self.source, section));
    }

    /// Returns `true` once the budget is spent.
    pub fn is_full(&self) -> bool {
        self.candidates.len() >= self.budget
    }

    /// Finish collecting.
    pub fn finish(self) -> Vec<Candidate> {
        tracing::debug!(source = %self.source, count = self.candidates.len(), "structured candidates extracted");
        self.candidates
    }
}

/// First of `fields` holding a non-empty string on `value`.
///
/// Used for sub-entries that carry alternative forms, e.g. a surface form
/// falling back to its reading.
pub fn first_non_empty<'a>(value: &'a Value, fields: &[&str]) -> Option<&'a str> {
    fields
        .iter()
        .filter_map(|field| value.get(field).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
}

/// The first [`MAX_ENTRIES`] items of the array at `key` (or of `value`
/// itself when `key` is `None`). Missing or non-array values yield nothing.
pub fn entries<'a>(value: &'a Value, key: Option<&str>) -> impl Iterator<Item = &'a Value> {
    let target = match key {
        Some(k) => value.get(k),
        None => Some(value),
    };
    target
        .and_then(Value::as_array)
        .map(|items| items.as_slice())
        .unwrap_or_default()
        .iter()
        .take(MAX_ENTRIES)
}

/// Items of the array at `key` on `value`, or nothing.
pub fn array_at<'a>(value: &'a Value, key: &str) -> impl Iterator<Item = &'a Value> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| items.as_slice())
        .unwrap_or_default()
        .iter()
}
