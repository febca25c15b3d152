//! Run statistics
//!
//! This module tallies what happened to each candidate link and prints a
//! short report at the end of a run.

use crate::state::PageOutcome;
use std::collections::BTreeMap;

/// Counters collected over one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStatistics {
    /// Candidate links found on the entry page
    pub links_discovered: u64,

    /// Pages served from the cache
    pub cache_hits: u64,

    /// Pages requested over the network
    pub network_fetches: u64,

    /// Count of links by outcome
    pub outcomes: BTreeMap<PageOutcome, u64>,
}

impl RunStatistics {
    /// Creates empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of one candidate link
    pub fn record_outcome(&mut self, outcome: PageOutcome) {
        *self.outcomes.entry(outcome).or_insert(0) += 1;
    }

    /// Number of links that ended in `outcome`
    pub fn count(&self, outcome: PageOutcome) -> u64 {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    /// Number of links written to the output index
    pub fn indexed(&self) -> u64 {
        self.outcomes
            .iter()
            .filter(|(outcome, _)| outcome.is_indexed())
            .map(|(_, count)| count)
            .sum()
    }

    /// Number of links whose page could not be loaded
    pub fn errors(&self) -> u64 {
        self.outcomes
            .iter()
            .filter(|(outcome, _)| outcome.is_error())
            .map(|(_, count)| count)
            .sum()
    }

    /// Number of links processed so far
    pub fn processed(&self) -> u64 {
        self.outcomes.values().sum()
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &RunStatistics) {
    println!("=== Scrape Statistics ===\n");

    println!("Overview:");
    println!("  Links discovered: {}", stats.links_discovered);
    println!("  Pages from cache: {}", stats.cache_hits);
    println!("  Pages fetched: {}", stats.network_fetches);
    println!();

    println!("Links by Outcome:");
    for outcome in PageOutcome::ALL {
        let count = stats.count(outcome);
        if count == 0 {
            continue;
        }
        let percentage = if stats.links_discovered > 0 {
            (count as f64 / stats.links_discovered as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} ({:.1}%)", outcome, count, percentage);
    }
    println!();

    println!(
        "Indexed: {} / {} links ({} errors)",
        stats.indexed(),
        stats.links_discovered,
        stats.errors()
    );
}
