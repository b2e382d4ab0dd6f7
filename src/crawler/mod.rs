//! Crawler module for page fetching and harvest orchestration
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with outcome classification
//! - Per-domain throttling
//! - The sequential album/song driver

mod driver;
mod fetcher;
mod throttle;

pub use driver::{harvest, CrawlDriver};
pub use fetcher::{build_http_client, fetch_url, FetchResult, Fetcher};
pub use throttle::Throttle;
