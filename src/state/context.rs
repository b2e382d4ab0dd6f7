//! Crawl context values threaded through the pipeline stages
//!
//! An [`AlbumContext`] is created fresh for every album and owned by the
//! album's visit; each song row gets its own [`SongContext`] snapshot. No
//! context outlives the album it describes.

use crate::catalog::{AlbumDescriptor, ReleaseDate};

/// What the crawl knows about the album currently being visited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumContext {
    pub album: String,

    /// Known for catalog-listed albums, unknown for discography-page albums
    pub release_date: Option<ReleaseDate>,

    track_number: u32,
}

impl AlbumContext {
    /// Creates a context with the track counter at zero
    pub fn new(album: impl Into<String>, release_date: Option<ReleaseDate>) -> Self {
        Self {
            album: album.into(),
            release_date,
            track_number: 0,
        }
    }

    pub fn from_descriptor(descriptor: &AlbumDescriptor) -> Self {
        Self::new(descriptor.name.clone(), Some(descriptor.release_date))
    }

    /// Advances to the next row and returns its 1-based track number
    pub fn next_track(&mut self) -> u32 {
        self.track_number += 1;
        self.track_number
    }

    /// Number of rows seen so far
    pub fn track_number(&self) -> u32 {
        self.track_number
    }

    /// Snapshot for the song at the current track number
    pub fn song(&self, title: impl Into<String>) -> SongContext {
        SongContext {
            album: self.album.clone(),
            release_date: self.release_date,
            track_number: self.track_number,
            title: title.into(),
        }
    }
}

/// Everything the sink needs to place one song's lyrics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongContext {
    pub album: String,
    pub release_date: Option<ReleaseDate>,
    pub track_number: u32,
    pub title: String,
}
