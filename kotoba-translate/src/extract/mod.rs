//! Candidate extraction strategies.
//!
//! Two strategies turn a raw [`crate::types::Payload`] into an unordered
//! list of [`crate::types::Candidate`]s:
//!
//! - [`structured`]: walks a known JSON shape, taking the first non-empty
//!   of several alternative fields per item
//! - [`html`]: selects markup blocks by CSS signature, flattens them to
//!   text and splits enumerations into sibling candidates
//!
//! Both bound their work to a prefix of the payload and never fail: a
//! malformed payload yields an empty list.

pub mod html;
pub mod structured;
