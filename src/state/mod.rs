//! State module for tracking per-link outcomes
//!
//! The driver assigns every candidate link a `PageOutcome`; the outcomes feed
//! the run statistics.

mod page_outcome;

pub use page_outcome::PageOutcome;
