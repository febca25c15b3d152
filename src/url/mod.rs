//! URL handling module for wikiscrape
//!
//! This module derives cache file paths from URLs, holds the link filter
//! predicate, and resolves hrefs against the page they were found on.

mod cache_path;
mod filter;

use url::Url;

// Re-export main items
pub use cache_path::cache_path_for;
pub use filter::LinkFilter;

/// Resolves an href against a base URL
///
/// Returns None if the href cannot be resolved or resolves to something
/// other than an HTTP(S) URL.
pub fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
