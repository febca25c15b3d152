//! HTTP fetcher with a flat-file page cache
//!
//! This module handles every page load for the scraper:
//! - Building the HTTP client with a user agent and a short timeout
//! - Deriving the cache file of a URL from its host and path
//! - Serving cached bytes when the cache is preferred
//! - Writing every network response to the cache
//!
//! The cache is write-always, read-conditional: a network fetch populates the
//! cache whether or not cached pages are preferred.

use crate::config::{FetchConfig, UserAgentConfig};
use crate::url::cache_path_for;
use crate::ScrapeError;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Page was served from the cache without a network request
    Cached {
        /// Cache file the page was read from
        path: PathBuf,
        /// Page body
        body: Vec<u8>,
    },

    /// Page was fetched over the network (and written to the cache unless the
    /// write failed)
    Fetched {
        /// Cache file the page was written to
        path: PathBuf,
        /// HTTP status code
        status_code: u16,
        /// Page body
        body: Vec<u8>,
    },

    /// The URL could not be parsed, or has no host to derive a cache path from
    InvalidUrl {
        /// Error description
        error: String,
    },

    /// Network error (connection refused, timeout, body read failure)
    NetworkError {
        /// Error description
        error: String,
        /// Whether the request hit the timeout
        timed_out: bool,
    },
}

impl FetchResult {
    /// Returns the page body, if one was obtained
    pub fn body(&self) -> Option<&[u8]> {
        match self {
            Self::Cached { body, .. } | Self::Fetched { body, .. } => Some(body.as_slice()),
            Self::InvalidUrl { .. } | Self::NetworkError { .. } => None,
        }
    }

    /// Consumes the result and returns the page body, if one was obtained
    pub fn into_body(self) -> Option<Vec<u8>> {
        match self {
            Self::Cached { body, .. } | Self::Fetched { body, .. } => Some(body),
            Self::InvalidUrl { .. } | Self::NetworkError { .. } => None,
        }
    }

    /// Returns true if the page came from the cache
    pub fn is_cache_hit(&self) -> bool {
        matches!(self, Self::Cached { .. })
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `fetch` - Fetch settings (request timeout)
/// * `user_agent` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use wikiscrape::config::{FetchConfig, UserAgentConfig};
/// use wikiscrape::crawler::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default(), &UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    fetch: &FetchConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(fetch.timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Loads pages from the cache or the network
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    cache_dir: PathBuf,
    use_cache: bool,
}

impl Fetcher {
    /// Creates a fetcher
    ///
    /// # Arguments
    ///
    /// * `client` - The HTTP client to use
    /// * `cache_dir` - Root directory of the page cache
    /// * `use_cache` - Serve existing cache files instead of requesting pages
    pub fn new(client: Client, cache_dir: impl Into<PathBuf>, use_cache: bool) -> Self {
        Self {
            client,
            cache_dir: cache_dir.into(),
            use_cache,
        }
    }

    /// Fetches a page from the cache or over the network
    ///
    /// # Request Flow
    ///
    /// 1. Parse the URL and derive its cache path
    ///    - Parse failure → `InvalidUrl`
    /// 2. If the cache is preferred and the file exists, return its bytes
    ///    - A read failure is logged and falls through to the network. A path
    ///      that passes `is_file()` but cannot be read is rare (it needs a
    ///      permission change), so this branch has no test.
    /// 3. Send a GET request
    ///    - Connection failure, timeout or body failure → `NetworkError`
    /// 4. Write the body to the cache path, creating parent directories
    ///
    /// Non-success status codes are logged; their bodies are still cached
    /// and returned. A cache write that fails for any reason other than a
    /// denied permission (e.g. `/wiki/Rust` already cached as a file when
    /// `/wiki/Rust/Syntax` needs it as a directory) is logged and the body
    /// is returned uncached.
    ///
    /// # Returns
    ///
    /// * `Ok(FetchResult)` - The page, or the reason it is absent
    /// * `Err(ScrapeError::Cache)` - Writing the cache file was not permitted
    pub async fn fetch_page(&self, page_url: &str) -> Result<FetchResult, ScrapeError> {
        let url = match Url::parse(page_url) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!("Could not parse {}: {}", page_url, e);
                return Ok(FetchResult::InvalidUrl {
                    error: e.to_string(),
                });
            }
        };

        let Some(cache_path) = cache_path_for(&url, &self.cache_dir) else {
            tracing::error!("Could not derive a cache path for {}", page_url);
            return Ok(FetchResult::InvalidUrl {
                error: "URL has no host".to_string(),
            });
        };

        if self.use_cache && cache_path.is_file() {
            tracing::info!("Loading cached page: {}", cache_path.display());
            match std::fs::read(&cache_path) {
                Ok(body) => {
                    return Ok(FetchResult::Cached {
                        path: cache_path,
                        body,
                    })
                }
                Err(e) => {
                    tracing::warn!(
                        "Could not read cached page {}: {}",
                        cache_path.display(),
                        e
                    );
                }
            }
        }

        tracing::info!("HTTP GET on: {}", url);
        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => return Ok(network_error(page_url, e)),
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("GET {} returned HTTP {}", page_url, status.as_u16());
        }

        let body = match response.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => return Ok(network_error(page_url, e)),
        };

        match write_cache_file(&cache_path, &body) {
            Ok(()) => {
                tracing::debug!("Cached {} bytes at {}", body.len(), cache_path.display());
            }
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                return Err(ScrapeError::Cache {
                    path: cache_path,
                    source: e,
                });
            }
            Err(e) => {
                tracing::warn!(
                    "Could not cache {} at {}: {}",
                    page_url,
                    cache_path.display(),
                    e
                );
            }
        }

        Ok(FetchResult::Fetched {
            path: cache_path,
            status_code: status.as_u16(),
            body,
        })
    }
}

/// Classifies a request error and logs it
fn network_error(page_url: &str, e: reqwest::Error) -> FetchResult {
    let timed_out = e.is_timeout();
    if timed_out {
        tracing::error!("Request timeout while attempting to GET {}", page_url);
    } else {
        tracing::error!("Error while attempting to GET {}: {}", page_url, e);
    }

    FetchResult::NetworkError {
        error: e.to_string(),
        timed_out,
    }
}

/// Writes a page body to its cache file, creating parent directories
fn write_cache_file(path: &Path, body: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, body)
}
