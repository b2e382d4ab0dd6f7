//! Run report: the failure log and counters for one harvest
//!
//! Failures are appended as they happen and printed once, at the end of the
//! run. Nothing in here stops the crawl.

use chrono::{DateTime, Utc};
use std::fmt;
use url::Url;

use crate::crawler::FetchResult;

/// Broad category of a recorded failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Connection, timeout, or body read failure
    Transport,
    /// Non-success HTTP status
    Status,
    /// Malformed catalog JSON
    Parse,
    /// Directory creation or file write failure
    Filesystem,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Status => "status",
            Self::Parse => "parse",
            Self::Filesystem => "filesystem",
        }
    }
}

/// One recorded failure
#[derive(Debug, Clone)]
pub struct RecordedFailure {
    pub kind: FailureKind,
    /// URL or filesystem path involved
    pub target: String,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl fmt::Display for RecordedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.kind.as_str(),
            self.target,
            self.message
        )
    }
}

/// Counters and failures for a harvest run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Failures in the order they happened
    pub failures: Vec<RecordedFailure>,

    pub catalog_pages: u64,
    pub albums_visited: u64,
    pub songs_written: u64,
    /// Songs written with the missing-lyrics placeholder
    pub songs_missing_lyrics: u64,
    /// Links not followed (outside the allowed domains, or already visited)
    pub links_skipped: u64,
    pub requests_made: u64,
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}

impl RunReport {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            failures: Vec::new(),
            catalog_pages: 0,
            albums_visited: 0,
            songs_written: 0,
            songs_missing_lyrics: 0,
            links_skipped: 0,
            requests_made: 0,
        }
    }

    /// Appends a failure and logs it
    pub fn record(
        &mut self,
        kind: FailureKind,
        target: impl Into<String>,
        message: impl Into<String>,
    ) {
        let failure = RecordedFailure {
            kind,
            target: target.into(),
            message: message.into(),
            at: Utc::now(),
        };
        tracing::warn!("{}", failure);
        self.failures.push(failure);
    }

    /// Records an unsuccessful fetch; successful results are ignored
    pub fn record_fetch_failure(&mut self, url: &Url, result: &FetchResult) {
        match result {
            FetchResult::Success { .. } => {}
            FetchResult::HttpError { status_code } => self.record(
                FailureKind::Status,
                url.as_str(),
                format!("received not-OK status {}", status_code),
            ),
            FetchResult::NetworkError { error } => {
                self.record(FailureKind::Transport, url.as_str(), error.clone())
            }
        }
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Number of failures of one kind
    pub fn count(&self, kind: FailureKind) -> usize {
        self.failures.iter().filter(|f| f.kind == kind).count()
    }

    /// Stamps the end of the run
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }
}

/// Prints the end-of-run summary and, if any, the failure list
pub fn print_report(report: &RunReport) {
    println!("=== Harvest Summary ===\n");
    println!("Started:  {}", report.started_at.to_rfc3339());
    if let Some(finished) = report.finished_at {
        println!("Finished: {}", finished.to_rfc3339());
    }
    if let Some(seconds) = report.duration_seconds() {
        println!("Duration: {}s", seconds);
    }

    println!();
    println!("Catalog pages:        {}", report.catalog_pages);
    println!("Albums visited:       {}", report.albums_visited);
    println!("Songs written:        {}", report.songs_written);
    println!("  missing lyrics:     {}", report.songs_missing_lyrics);
    println!("Links skipped:        {}", report.links_skipped);
    println!("Requests made:        {}", report.requests_made);

    if report.has_failures() {
        println!("\nFinished scraping with errors:");
        for failure in &report.failures {
            println!("  {}", failure);
        }
    } else {
        println!("\n✓ Finished scraping without errors");
    }
}
