//! Configuration module
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use lyrics_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Delay between requests: {}ms", config.crawler.request_delay);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{
    CatalogConfig, CatalogSeed, Config, CrawlerConfig, Layout, OutputConfig, UserAgentConfig,
    DEFAULT_USER_AGENT,
};

pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
