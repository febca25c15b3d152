use crate::url::LinkFilter;
use serde::Deserialize;
use std::path::PathBuf;

/// Entry page of the default run
pub const DEFAULT_ENTRY_URL: &str = "https://en.wikipedia.org/wiki/List_of_programming_languages";

/// Main configuration structure for wikiscrape
///
/// Every section is optional; a missing section takes its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scrape: ScrapeConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Pipeline configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Page whose list-item links are followed
    #[serde(rename = "entry-url")]
    pub entry_url: String,

    /// Which list-item hrefs count as candidate links
    #[serde(rename = "link-filter")]
    pub link_filter: LinkFilter,

    /// Fetch each link and extract infobox fields. When false every
    /// discovered link is recorded with an empty object.
    #[serde(rename = "extract-fields")]
    pub extract_fields: bool,

    /// Load pages from the cache directory instead of the network when present
    #[serde(rename = "use-cache")]
    pub use_cache: bool,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            entry_url: DEFAULT_ENTRY_URL.to_string(),
            link_filter: LinkFilter::default(),
            extract_fields: true,
            use_cache: false,
        }
    }
}

/// HTTP fetch configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Root directory of the page cache
    #[serde(rename = "cache-dir")]
    pub cache_dir: PathBuf,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 3,
            cache_dir: PathBuf::from("."),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: env!("CARGO_PKG_NAME").to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// `Name/Version (+ContactURL)`, or `Name/Version` without a contact URL.
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the JSON index written at the end of the run
    #[serde(rename = "index-path")]
    pub index_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            index_path: PathBuf::from("index.json"),
        }
    }
}
