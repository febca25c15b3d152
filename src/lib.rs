//! Wikiscrape: a small Wikipedia language-list scraper
//!
//! This crate fetches a list page, follows the list-item links it contains,
//! extracts infobox fields from each linked article and writes the results
//! as a JSON index keyed by URL. Fetched pages are cached to flat files.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod state;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for wikiscrape operations
///
/// Per-page failures (bad URLs, network errors, missing markup) never reach
/// this type; they are logged and turned into skipped entries. What remains
/// here terminates the run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Not permitted to write cache file {path}: {source}")]
    Cache {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write output file {path}: {source}")]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for wikiscrape operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

// Re-export commonly used types
pub use config::Config;
pub use extract::{extract_language, LanguageRecord};
pub use output::OutputIndex;
pub use state::PageOutcome;
pub use crate::url::{cache_path_for, LinkFilter};
