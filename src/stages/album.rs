//! Album stage: song rows to song visits
//!
//! Each `div.chart_row-content` row on an album page is one track. Rows are
//! numbered in document order, starting at 1, whether or not they carry a
//! followable link.

use crate::state::{AlbumContext, SongContext};
use crate::url::resolve_link;
use scraper::{Html, Selector};
use url::Url;

/// Selector for one track row on an album page
pub const SONG_ROW_SELECTOR: &str = "div.chart_row-content";

const LINK_SELECTOR: &str = "a[href]";

/// A song page scheduled for a visit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongVisit {
    pub context: SongContext,
    pub url: Url,
}

/// Extracts the ordered song visits from an album page
///
/// `album` is advanced once per row. A row with no usable link still takes a
/// track number, so numbering always reflects row position.
///
/// # Arguments
///
/// * `document` - The parsed album page
/// * `page_url` - The album page's final URL, for resolving relative links
/// * `album` - The album's context; its track counter is advanced
pub fn album_stage(document: &Html, page_url: &Url, album: &mut AlbumContext) -> Vec<SongVisit> {
    let (Ok(row_selector), Ok(link_selector)) =
        (Selector::parse(SONG_ROW_SELECTOR), Selector::parse(LINK_SELECTOR))
    else {
        return Vec::new();
    };

    let mut visits = Vec::new();

    for row in document.select(&row_selector) {
        let track = album.next_track();

        let Some(link) = row.select(&link_selector).next() else {
            tracing::debug!("Track {} of '{}' has no link, skipping", track, album.album);
            continue;
        };

        let title = trim_title(&link.text().collect::<String>());

        let Some(url) = link
            .value()
            .attr("href")
            .and_then(|href| resolve_link(href, page_url))
        else {
            tracing::debug!(
                "Track {} '{}' of '{}' has an unfollowable link, skipping",
                track,
                title,
                album.album
            );
            continue;
        };

        visits.push(SongVisit {
            context: album.song(title),
            url,
        });
    }

    visits
}

/// Normalizes a raw song-row title
///
/// Removes every newline and every literal `Lyrics`, then trims surrounding
/// whitespace. Removal repeats until no `Lyrics` remains, so the function is
/// idempotent.
///
/// # Examples
///
/// ```
/// use lyrics_harvest::stages::trim_title;
///
/// assert_eq!(trim_title("Song Name\nLyrics  "), "Song Name");
/// ```
pub fn trim_title(raw: &str) -> String {
    let mut title = raw.replace('\n', "");
    while title.contains("Lyrics") {
        title = title.replace("Lyrics", "");
    }
    title.trim().to_string()
}
