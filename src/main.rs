//! Listing-Harvester main entry point
//!
//! This is the command-line interface for the listing harvester.

use anyhow::Context;
use clap::{Parser, Subcommand};
use listing_harvester::config::{load_config_with_hash, Config};
use listing_harvester::{filter_by_rating, plan_pages, HarvestError, Harvester};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Listing-Harvester: discover categories and harvest paginated listings
#[derive(Parser, Debug)]
#[command(name = "listing-harvester")]
#[command(version)]
#[command(about = "Discover categories and harvest paginated listings", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in site defaults if omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the site's categories
    Categories,

    /// Fetch, filter, and print the listings of selected categories
    Items {
        /// Category name as shown by `categories` (repeatable)
        #[arg(short = 'C', long = "category", value_name = "NAME")]
        categories: Vec<String>,

        /// Number of pages to fetch per category
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,

        /// Minimum rating an item must have to be printed
        #[arg(short, long, default_value_t = 0.0, value_parser = parse_min_rating)]
        min_rating: f64,
    },

    /// Show the page URLs that would be fetched for a category URL
    Plan {
        /// Category URL
        #[arg(value_name = "URL")]
        url: String,

        /// Number of pages
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load configuration
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::debug!("No configuration file given, using built-in defaults");
            Config::default()
        }
    };

    // Handle different commands
    match cli.command {
        Command::Categories => handle_categories(config).await,
        Command::Items {
            categories,
            pages,
            min_rating,
        } => handle_items(config, &categories, pages, min_rating).await,
        Command::Plan { url, pages } => handle_plan(config, &url, pages),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so that stdout carries only results.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("listing_harvester=warn,warn"),
            1 => EnvFilter::new("listing_harvester=info,warn"),
            2 => EnvFilter::new("listing_harvester=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn parse_min_rating(value: &str) -> Result<f64, String> {
    let rating: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;

    if !(0.0..=10.0).contains(&rating) {
        return Err(format!("minimum rating must be between 0 and 10, got {}", rating));
    }

    Ok(rating)
}

/// Handles `categories`: prints every category name and URL
async fn handle_categories(config: Config) -> anyhow::Result<()> {
    let harvester = Harvester::new(config)?;

    let directory = match harvester.discover_categories().await {
        Ok(directory) => directory,
        Err(e @ HarvestError::StructureNotFound { .. }) => {
            eprintln!("No categories found: the site layout has changed ({})", e);
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    if directory.is_empty() {
        println!("The category directory is empty.");
        return Ok(());
    }

    for category in directory {
        println!("{}\t{}", category.name, category.url);
    }

    Ok(())
}

/// Handles `items`: discovers, selects, lists, filters, and prints
async fn handle_items(
    config: Config,
    names: &[String],
    pages: u32,
    min_rating: f64,
) -> anyhow::Result<()> {
    let harvester = Harvester::new(config)?;

    let directory = match harvester.discover_categories().await {
        Ok(directory) => directory,
        Err(e @ HarvestError::StructureNotFound { .. }) => {
            eprintln!("No categories found: the site layout has changed ({})", e);
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    let selected = directory.select(names)?;
    if selected.is_empty() {
        println!(
            "No category selected ({} available, see the `categories` command).",
            directory.len()
        );
        return Ok(());
    }

    let result = harvester.list_categories(&selected, pages).await?;

    // Print kept items grouped by category, in page order
    let mut current_category: Option<&str> = None;
    let mut kept_total = 0;
    for (request, items) in result.pages() {
        let kept = filter_by_rating(items.iter().cloned(), min_rating);
        if kept.is_empty() {
            continue;
        }

        if current_category != Some(request.category_name.as_str()) {
            println!("\n== {} ==\n", request.category_name);
            current_category = Some(request.category_name.as_str());
        }

        for item in &kept {
            println!("{}\n", item);
        }
        kept_total += kept.len();
    }

    if result.items.is_empty() {
        println!("No items found in the selected categories.");
    } else if kept_total == 0 {
        println!(
            "{} items found, none rated at least {}.",
            result.items.len(),
            min_rating
        );
    }

    // Report failed pages
    if !result.failures.is_empty() {
        eprintln!(
            "{} of {} pages could not be retrieved:",
            result.failures.len(),
            result.total_requests()
        );
        for failure in &result.failures {
            eprintln!("  {}: {}", failure.request, failure.reason);
        }
    }

    Ok(())
}

/// Handles `plan`: prints the page URLs without fetching anything
fn handle_plan(config: Config, url: &str, pages: u32) -> anyhow::Result<()> {
    listing_harvester::config::validate(&config)?;

    let site = &config.site;
    let page_urls = plan_pages(url, pages, &site.listing_sigil, &site.page_token);
    for (index, page_url) in page_urls.iter().enumerate() {
        println!("{:>4}  {}", index + 1, page_url);
    }

    Ok(())
}
