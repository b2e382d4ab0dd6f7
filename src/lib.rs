//! Lyrics Harvest: an album-by-album lyrics crawler
//!
//! This crate walks an artist catalog (a paginated JSON listing or a
//! discography page), visits every album page, follows each song row in
//! order and writes one lyrics file per song, grouped by album.

pub mod catalog;
pub mod config;
pub mod crawler;
pub mod output;
pub mod stages;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for harvest operations
///
/// Individual page failures never surface here; they are recorded in the
/// [`output::RunReport`] and the crawl moves on. This type covers setup
/// failures and broken internal invariants.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Invalid phase transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlPhase,
        to: state::CrawlPhase,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid domain pattern: {0}")]
    InvalidPattern(String),
}

/// Result type alias for harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use catalog::{AlbumDescriptor, CatalogPage, ReleaseDate};
pub use config::Config;
pub use crawler::{harvest, CrawlDriver};
pub use output::{FileSink, LyricsSink, RunReport};
pub use state::{AlbumContext, CrawlPhase, SongContext};
