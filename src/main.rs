//! Radscrape main entry point
//!
//! Command-line interface for crawling the Radiopaedia search index.

use anyhow::bail;
use clap::{Parser, ValueEnum};
use radscrape::config::load_config_or_default;
use radscrape::crawler::run_query;
use radscrape::output::{print_stats, write_json, RunStats};
use radscrape::query::{Scope, SearchQuery, Section, System};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliScope {
    Articles,
    Cases,
}

impl From<CliScope> for Scope {
    fn from(scope: CliScope) -> Self {
        match scope {
            CliScope::Articles => Scope::Articles,
            CliScope::Cases => Scope::Cases,
        }
    }
}

/// Radscrape: a polite scraper for the Radiopaedia search index
///
/// Crawls up to five pages of article or case search results, follows each
/// hit to its detail page, and writes the extracted records as JSON.
#[derive(Parser, Debug)]
#[command(name = "radscrape")]
#[command(version = "1.0.0")]
#[command(about = "Scrape Radiopaedia articles and cases", long_about = None)]
struct Cli {
    /// What to scrape
    #[arg(value_enum)]
    scope: CliScope,

    /// Number of listing pages to crawl (1-5)
    #[arg(short, long, default_value_t = 1)]
    pages: u32,

    /// Filter articles by section, e.g. "Anatomy" (case-sensitive)
    #[arg(long, conflicts_with_all = ["system", "recent"])]
    section: Option<String>,

    /// Filter by body system, e.g. "Central Nervous System" (case-sensitive)
    #[arg(long, conflicts_with_all = ["section", "recent"])]
    system: Option<String>,

    /// Sort by recency instead of filtering
    #[arg(long, conflicts_with_all = ["section", "system"])]
    recent: bool,

    /// Save each case's thumbnail image under the configured image directory
    #[arg(long)]
    save_images: bool,

    /// Where to write the JSON result document (overrides config)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_config_or_default(cli.config.as_deref())?;

    let query = build_query(&cli)?;

    let save_images = match (cli.save_images, query.scope()) {
        (true, Scope::Articles) => {
            tracing::warn!("Articles have no images to save; ignoring --save-images");
            false
        }
        (requested, _) => requested,
    };

    let output = run_query(&config, query, save_images).await?;

    if output.results.is_empty_of_records() {
        bail!("No results found for this query");
    }

    let results_path = cli
        .out
        .unwrap_or_else(|| PathBuf::from(&config.output.results_path));
    write_json(&output, &results_path)?;
    tracing::info!("Results written to {}", results_path.display());

    if !cli.quiet {
        print_stats(&RunStats::from_result(&output.results), &output.assets);
    }

    Ok(())
}

/// Assembles the validated search query from CLI flags
fn build_query(cli: &Cli) -> anyhow::Result<SearchQuery> {
    let scope: Scope = cli.scope.into();

    let query = if cli.recent {
        SearchQuery::recent(scope, cli.pages)?
    } else {
        let base = SearchQuery::new(scope, cli.pages)?;
        if let Some(name) = &cli.section {
            base.with_section(Section::from_name(name)?)?
        } else if let Some(name) = &cli.system {
            base.with_system(System::from_name(name)?)?
        } else {
            base
        }
    };

    Ok(query)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("radscrape=info,warn"),
            1 => EnvFilter::new("radscrape=debug,info"),
            2 => EnvFilter::new("radscrape=trace,debug"),
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
