//! Wikiscrape main entry point
//!
//! This is the command-line interface for the wikiscrape language scraper.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wikiscrape::config::{load_config_with_hash, validate, Config};
use wikiscrape::crawler::Coordinator;
use wikiscrape::output::print_statistics;
use wikiscrape::url::LinkFilter;

/// Wikiscrape: programming-language infobox scraper
///
/// Wikiscrape loads a list page, follows the links in its list items and
/// extracts paradigm, first-appeared and filename-extension data from each
/// linked article into a JSON index.
#[derive(Parser, Debug)]
#[command(name = "wikiscrape")]
#[command(version)]
#[command(about = "Scrape programming-language infoboxes into a JSON index", long_about = None)]
struct Cli {
    /// Entry page whose list-item links are followed
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Load cached pages in place of HTTP GET requests when available
    #[arg(short = 'c', long = "cache")]
    cache: bool,

    /// Path to TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Which list-item links to follow
    #[arg(long, value_enum, value_name = "FILTER")]
    link_filter: Option<LinkFilter>,

    /// Record discovered links without fetching them
    #[arg(long)]
    links_only: bool,

    /// Path of the JSON index to write
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Root directory of the page cache
    #[arg(long, value_name = "DIR")]
    cache_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the effective configuration without scraping
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };

    apply_overrides(&mut config, &cli);
    if let Err(e) = validate(&config) {
        tracing::error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    if cli.dry_run {
        handle_dry_run(&config);
    } else {
        handle_scrape(config, cli.quiet).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wikiscrape=info,warn"),
            1 => EnvFilter::new("wikiscrape=debug,info"),
            2 => EnvFilter::new("wikiscrape=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Layers command-line flags over the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(url) = &cli.url {
        config.scrape.entry_url = url.clone();
    }
    if cli.cache {
        config.scrape.use_cache = true;
    }
    if let Some(filter) = cli.link_filter {
        config.scrape.link_filter = filter;
    }
    if cli.links_only {
        config.scrape.extract_fields = false;
    }
    if let Some(output) = &cli.output {
        config.output.index_path = output.clone();
    }
    if let Some(cache_dir) = &cli.cache_dir {
        config.fetch.cache_dir = cache_dir.clone();
    }
}

/// Handles the --dry-run mode: shows what would be scraped
fn handle_dry_run(config: &Config) {
    println!("=== Wikiscrape Dry Run ===\n");

    println!("Scrape:");
    println!("  Entry URL: {}", config.scrape.entry_url);
    println!("  Link filter: {}", config.scrape.link_filter);
    println!("  Extract fields: {}", config.scrape.extract_fields);
    println!("  Use cache: {}", config.scrape.use_cache);

    println!("\nFetch:");
    println!("  Timeout: {}s", config.fetch.timeout_secs);
    println!("  Cache dir: {}", config.fetch.cache_dir.display());
    println!("  User agent: {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Index: {}", config.output.index_path.display());

    println!("\n✓ Configuration is valid");
}

/// Handles the main scrape operation
async fn handle_scrape(config: Config, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Starting scrape of {} (cache {})",
        config.scrape.entry_url,
        if config.scrape.use_cache { "preferred" } else { "write-only" }
    );

    let mut coordinator = Coordinator::new(config)?;
    match coordinator.run().await {
        Ok(_) => {
            if !quiet {
                print_statistics(coordinator.statistics());
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            Err(e.into())
        }
    }
}
