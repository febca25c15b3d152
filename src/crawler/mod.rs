//! Crawler module for page fetching and processing
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching backed by a flat-file page cache
//! - HTML parsing and list-item link extraction
//! - Overall run coordination

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{run_scrape, Coordinator};
pub use fetcher::{build_http_client, FetchResult, Fetcher};
pub use parser::{extract_list_links, parse_list_page, ParsedPage};
