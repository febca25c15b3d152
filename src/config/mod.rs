//! Configuration module for wikiscrape
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so running without a configuration file is the
//! common case; command-line flags are layered on top.
//!
//! # Example
//!
//! ```no_run
//! use wikiscrape::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("wikiscrape.toml")).unwrap();
//! println!("Request timeout: {}s", config.fetch.timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, FetchConfig, OutputConfig, ScrapeConfig, UserAgentConfig, DEFAULT_ENTRY_URL,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
