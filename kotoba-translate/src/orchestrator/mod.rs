//! Lookup orchestrator: concurrent fetches, filtering, aggregation, ranking.
//!
//! This module fans out a lookup to every enabled source concurrently,
//! filters each source's candidates, folds them into one term per
//! normalised text, and returns a deterministically ranked, truncated
//! result.

pub mod aggregate;
pub mod lookup;
pub mod rank;
