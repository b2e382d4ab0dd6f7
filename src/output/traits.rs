//! Output sink trait and error type

use crate::state::SongContext;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while persisting lyrics
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl OutputError {
    /// The filesystem path the failed operation targeted
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::CreateDir { path, .. } | Self::Write { path, .. } => path,
        }
    }
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for extracted lyrics
///
/// The driver calls [`write_song`](LyricsSink::write_song) exactly once per
/// attempted song, with either the extracted body or the missing-lyrics
/// placeholder.
pub trait LyricsSink {
    /// Persists one song's lyrics
    ///
    /// # Arguments
    ///
    /// * `song` - Album, release date, track number and title of the song
    /// * `body` - The lyrics text
    ///
    /// # Returns
    ///
    /// Where the lyrics ended up
    fn write_song(&self, song: &SongContext, body: &str) -> OutputResult<PathBuf>;
}
