//! Outcome definitions for links processed by the driver
//!
//! Every candidate link ends in exactly one of these outcomes.

use std::fmt;

/// What happened to a single candidate link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PageOutcome {
    // ===== Success States =====
    /// Article yielded a complete language record
    Recorded,

    /// Link was recorded without fetching (field extraction disabled)
    Listed,

    // ===== Skip States =====
    /// Infobox lacks paradigm, first-appeared or filename-extensions
    Incomplete,

    /// Page has no infobox or no article body
    MissingStructure,

    // ===== Error States =====
    /// URL could not be parsed or the request failed
    FetchFailed,
}

impl PageOutcome {
    /// All outcomes, in reporting order
    pub const ALL: [PageOutcome; 5] = [
        Self::Recorded,
        Self::Listed,
        Self::Incomplete,
        Self::MissingStructure,
        Self::FetchFailed,
    ];

    /// Returns true if the link appears in the output index
    pub fn is_indexed(&self) -> bool {
        matches!(self, Self::Recorded | Self::Listed)
    }

    /// Returns true if the page was reachable but did not qualify
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Incomplete | Self::MissingStructure)
    }

    /// Returns true if this represents an error state
    pub fn is_error(&self) -> bool {
        matches!(self, Self::FetchFailed)
    }

    /// Short snake_case label used in logs and summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recorded => "recorded",
            Self::Listed => "listed",
            Self::Incomplete => "incomplete",
            Self::MissingStructure => "missing_structure",
            Self::FetchFailed => "fetch_failed",
        }
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
