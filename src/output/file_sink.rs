//! Plain-text lyrics files on disk

use crate::config::{Layout, OutputConfig};
use crate::output::traits::{LyricsSink, OutputError, OutputResult};
use crate::state::SongContext;
use std::fs;
use std::path::PathBuf;

/// Writes one `.txt` file per song under a root directory
///
/// Nested layout: `<root>/<album> (<YYYY-MM-DD>)/<track> <title>.txt`, or
/// `<root>/<album>/<track> <title>.txt` when the release date is unknown.
/// Flat layout: `<root>/<title>.txt`.
///
/// The file holds the title, a blank line, then the lyrics. Existing files
/// are overwritten, so a re-run over the same input reproduces the same bytes.
#[derive(Debug, Clone)]
pub struct FileSink {
    root: PathBuf,
    layout: Layout,
}

impl FileSink {
    pub fn new(root: impl Into<PathBuf>, layout: Layout) -> Self {
        Self {
            root: root.into(),
            layout,
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(&config.lyrics_dir, config.layout)
    }

    /// The directory a song's file lives in
    pub fn song_dir(&self, song: &SongContext) -> PathBuf {
        match self.layout {
            Layout::Flat => self.root.clone(),
            Layout::Nested => {
                let album = path_component(&song.album);
                let dir = match song.release_date {
                    Some(date) => format!("{} ({})", album, date),
                    None => album,
                };
                self.root.join(dir)
            }
        }
    }

    /// The full path of a song's file
    pub fn song_path(&self, song: &SongContext) -> PathBuf {
        let title = path_component(&song.title);
        let file_name = match self.layout {
            Layout::Flat => format!("{}.txt", title),
            Layout::Nested => format!("{} {}.txt", song.track_number, title),
        };
        self.song_dir(song).join(file_name)
    }
}

/// File contents for a song: title, blank line, lyrics
pub fn render_song_file(title: &str, body: &str) -> String {
    format!("{}\n\n{}", title, body)
}

/// Stand-in for names that cannot be a directory or file name
const UNNAMED: &str = "_";

/// Keeps a name inside one path component
///
/// Separators become `-`; empty, `.` and `..` names become [`UNNAMED`].
fn path_component(name: &str) -> String {
    let name = name.replace(['/', '\\'], "-");
    match name.trim() {
        "" | "." | ".." => UNNAMED.to_string(),
        _ => name,
    }
}

impl LyricsSink for FileSink {
    fn write_song(&self, song: &SongContext, body: &str) -> OutputResult<PathBuf> {
        let dir = self.song_dir(song);
        fs::create_dir_all(&dir).map_err(|source| OutputError::CreateDir {
            path: dir.clone(),
            source,
        })?;

        let path = self.song_path(song);
        fs::write(&path, render_song_file(&song.title, body)).map_err(|source| {
            OutputError::Write {
                path: path.clone(),
                source,
            }
        })?;

        Ok(path)
    }
}
