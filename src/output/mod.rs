//! Output module for scrape results
//!
//! This module handles:
//! - Accumulating language records into the URL-keyed output index
//! - Writing the index as indented JSON
//! - Recording run statistics

mod index;
pub mod stats;

pub use index::{write_index, IndexEntry, OutputIndex};
pub use stats::{print_statistics, RunStatistics};
