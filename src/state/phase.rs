//! Crawl phase definitions for the harvest driver
//!
//! The driver moves through these phases strictly sequentially; every change
//! goes through [`CrawlPhase::can_transition_to`].

use std::fmt;

/// Represents what the driver is doing right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Nothing started yet
    Idle,

    /// Walking the catalog listing or the discography page
    FetchingCatalog,

    /// Fetching an album page and reading its song rows
    VisitingAlbum,

    /// Fetching a song page
    VisitingSong,

    /// Extracting and persisting lyrics for the fetched song
    ExtractingLyrics,

    /// All albums done; the report has been flushed
    Finished,
}

impl CrawlPhase {
    /// Returns true if no further work happens in this phase
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished)
    }

    /// Returns true if moving from `self` to `next` is a legal step
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        use CrawlPhase::*;

        if self.is_terminal() {
            return false;
        }

        match (self, next) {
            (Idle, FetchingCatalog) => true,
            (FetchingCatalog, VisitingAlbum) => true,
            (VisitingAlbum, VisitingAlbum | VisitingSong) => true,
            // A failed song request still goes through extraction, with the
            // missing-lyrics body.
            (VisitingSong, ExtractingLyrics) => true,
            (ExtractingLyrics, VisitingSong | VisitingAlbum) => true,
            (_, Finished) => true,
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::FetchingCatalog => "fetching_catalog",
            Self::VisitingAlbum => "visiting_album",
            Self::VisitingSong => "visiting_song",
            Self::ExtractingLyrics => "extracting_lyrics",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
