//! Pipeline stages
//!
//! Each stage is a plain function over a parsed page and an explicit
//! context, returning the next visits (or the extracted lyrics). The driver
//! calls them in order after each fetch:
//!
//! - `discography`: discography page → album visits
//! - `album`: album page → numbered song visits
//! - `lyrics`: song page → lyrics document

mod album;
mod discography;
mod lyrics;

pub use album::{album_stage, trim_title, SongVisit, SONG_ROW_SELECTOR};
pub use discography::{discography_stage, AlbumVisit};
pub use lyrics::{extract_lyrics, lyrics_stage, LyricsDocument, MISSING_LYRICS};
