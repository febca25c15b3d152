//! Scrape coordinator - the linear driver of a run
//!
//! A run moves through four steps with no branching beyond per-link success
//! or failure:
//! 1. Fetch the entry page
//! 2. Extract candidate links from its list items
//! 3. For each link in ascending URL order: fetch, extract, accumulate
//! 4. Write the output index
//!
//! Requests are awaited one at a time. A link that cannot be fetched or does
//! not qualify is logged and skipped; only a denied cache write and output
//! write failures end the run.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, FetchResult, Fetcher};
use crate::crawler::parser::parse_list_page;
use crate::extract::{complete_record, extract_article};
use crate::output::{write_index, OutputIndex, RunStatistics};
use crate::state::PageOutcome;
use crate::ScrapeError;
use scraper::Html;
use std::collections::BTreeSet;
use url::Url;

/// Main scrape coordinator structure
pub struct Coordinator {
    config: Config,
    fetcher: Fetcher,
    stats: RunStatistics,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The scraper configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(ScrapeError)` - Failed to build the HTTP client
    pub fn new(config: Config) -> Result<Self, ScrapeError> {
        let client = build_http_client(&config.fetch, &config.user_agent)?;
        let fetcher = Fetcher::new(
            client,
            config.fetch.cache_dir.clone(),
            config.scrape.use_cache,
        );

        Ok(Self::with_fetcher(config, fetcher))
    }

    /// Creates a coordinator around an existing fetcher
    pub fn with_fetcher(config: Config, fetcher: Fetcher) -> Self {
        Self {
            config,
            fetcher,
            stats: RunStatistics::new(),
        }
    }

    /// Statistics of the most recent run
    pub fn statistics(&self) -> &RunStatistics {
        &self.stats
    }

    /// Runs the scrape and writes the output index
    ///
    /// # Returns
    ///
    /// * `Ok(OutputIndex)` - The index that was written
    /// * `Err(ScrapeError)` - A cache write was denied or the output file
    ///   could not be written
    pub async fn run(&mut self) -> Result<OutputIndex, ScrapeError> {
        let index = self.collect().await?;

        let output_path = &self.config.output.index_path;
        write_index(&index, output_path)?;
        tracing::info!(
            "Wrote {} entries to {}",
            index.len(),
            output_path.display()
        );

        Ok(index)
    }

    /// Runs the scrape and returns the accumulated index without writing it
    pub async fn collect(&mut self) -> Result<OutputIndex, ScrapeError> {
        self.stats = RunStatistics::new();
        let mut index = OutputIndex::new();

        let links = self.discover_links().await?;
        self.stats.links_discovered = links.len() as u64;
        tracing::info!("Found {} candidate links", links.len());

        for link in &links {
            let outcome = self.process_link(link, &mut index).await?;
            tracing::debug!("{} -> {}", link, outcome);
            self.stats.record_outcome(outcome);
        }

        tracing::info!(
            "Scrape complete: {} of {} links indexed",
            self.stats.indexed(),
            self.stats.links_discovered
        );

        Ok(index)
    }

    /// Fetches the entry page and extracts its candidate links
    ///
    /// An entry page that cannot be parsed or loaded yields no links.
    async fn discover_links(&mut self) -> Result<BTreeSet<String>, ScrapeError> {
        let entry_url = self.config.scrape.entry_url.clone();
        let base_url = match Url::parse(&entry_url) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!("Could not parse entry URL {}: {}", entry_url, e);
                return Ok(BTreeSet::new());
            }
        };

        let result = self.fetcher.fetch_page(base_url.as_str()).await?;
        self.count_fetch(&result);
        let Some(body) = result.into_body() else {
            tracing::error!("Could not load entry page {}", entry_url);
            return Ok(BTreeSet::new());
        };

        let html = String::from_utf8_lossy(&body);
        let parsed = parse_list_page(&html, &base_url, self.config.scrape.link_filter);
        if let Some(title) = &parsed.title {
            tracing::info!("Entry page: {}", title);
        }

        Ok(parsed.links)
    }

    /// Processes a single candidate link
    ///
    /// This is where the per-link logic happens:
    /// 1. With extraction disabled, record the link as a placeholder
    /// 2. Fetch the page (cache or network)
    /// 3. Extract the article fields
    /// 4. Record the language if the infobox is complete
    async fn process_link(
        &mut self,
        link: &str,
        index: &mut OutputIndex,
    ) -> Result<PageOutcome, ScrapeError> {
        if !self.config.scrape.extract_fields {
            index.insert_placeholder(link);
            return Ok(PageOutcome::Listed);
        }

        let result = self.fetcher.fetch_page(link).await?;
        self.count_fetch(&result);
        let Some(body) = result.into_body() else {
            return Ok(PageOutcome::FetchFailed);
        };

        let document = Html::parse_document(&String::from_utf8_lossy(&body));
        let Some(fields) = extract_article(&document, link) else {
            return Ok(PageOutcome::MissingStructure);
        };

        match complete_record(fields, link) {
            Some(record) => {
                index.insert_record(record);
                Ok(PageOutcome::Recorded)
            }
            None => Ok(PageOutcome::Incomplete),
        }
    }

    /// Tallies where a page came from
    fn count_fetch(&mut self, result: &FetchResult) {
        match result {
            FetchResult::Cached { .. } => self.stats.cache_hits += 1,
            FetchResult::Fetched { .. } => self.stats.network_fetches += 1,
            FetchResult::InvalidUrl { .. } | FetchResult::NetworkError { .. } => {}
        }
    }
}

/// Runs a complete scrape
///
/// This is the main entry point for a run. It will:
/// 1. Build the HTTP client
/// 2. Load the entry page and extract its links
/// 3. Fetch and extract every link
/// 4. Write the output index
///
/// # Returns
///
/// * `Ok(RunStatistics)` - Scrape completed
/// * `Err(ScrapeError)` - Scrape failed
pub async fn run_scrape(config: Config) -> Result<RunStatistics, ScrapeError> {
    let mut coordinator = Coordinator::new(config)?;
    coordinator.run().await?;
    Ok(coordinator.stats)
}
