//! Lyrics Harvest main entry point
//!
//! This is the command-line interface for the lyrics harvester.

use anyhow::Context;
use clap::Parser;
use lyrics_harvest::config::{load_config_with_hash, CatalogSeed, Config};
use lyrics_harvest::crawler::harvest;
use lyrics_harvest::output::print_report;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Lyrics Harvest: album-by-album lyrics crawler
///
/// Walks an artist's catalog, visits every album and song page, and writes
/// one text file of lyrics per song, grouped by album.
#[derive(Parser, Debug)]
#[command(name = "lyrics-harvest")]
#[command(version)]
#[command(about = "Album-by-album lyrics crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,

    /// Write lyrics here instead of the configured lyrics-dir
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if let Some(dir) = cli.output_dir {
        config.output.lyrics_dir = dir.display().to_string();
    }

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else {
        handle_harvest(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("lyrics_harvest=info,warn"),
            1 => EnvFilter::new("lyrics_harvest=debug,info"),
            2 => EnvFilter::new("lyrics_harvest=trace,debug"),
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

/// Handles --dry-run: shows the resolved configuration
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== Lyrics Harvest Dry Run ===\n");

    println!("Catalog:");
    match config.catalog.seed()? {
        CatalogSeed::Api(url) => {
            println!("  Listing: {}", url);
            match config.catalog.page_limit() {
                Some(limit) => println!("  Max pages: {}", limit),
                None => println!("  Max pages: unbounded"),
            }
        }
        CatalogSeed::Discography {
            url,
            album_path_prefix,
        } => {
            println!("  Discography page: {}", url);
            println!("  Album path prefix: {}", album_path_prefix);
        }
    }

    println!("\nCrawler:");
    println!("  Request delay: {}ms", config.crawler.request_delay);
    println!("  Request timeout: {}s", config.crawler.request_timeout);
    println!("  Allow revisit: {}", config.crawler.allow_revisit);
    if config.crawler.allowed_domains.is_empty() {
        println!("  Allowed domains: any");
    } else {
        println!("  Allowed domains:");
        for pattern in &config.crawler.allowed_domains {
            println!("    - {}", pattern);
        }
    }

    println!("\nUser Agent: {}", config.user_agent.value);

    println!("\nOutput:");
    println!("  Lyrics dir: {}", config.output.lyrics_dir);
    println!("  Layout: {:?}", config.output.layout);

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the harvest itself and prints the summary
async fn handle_harvest(config: Config) -> anyhow::Result<()> {
    tracing::info!("Writing lyrics under {}", config.output.lyrics_dir);

    let report = harvest(config).await.context("harvest aborted")?;
    print_report(&report);

    Ok(())
}
