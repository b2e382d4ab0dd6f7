//! Lyrics extraction stage
//!
//! A song page keeps its lyrics under `div#lyrics-root`, split across one or
//! more `div[data-lyrics-container="true"]` blocks. Containers also embed
//! annotation and header `div`s that are not lyrics; those subtrees are
//! dropped and `<br>` becomes a newline.

use crate::state::SongContext;
use scraper::{ElementRef, Html, Node, Selector};

/// Body written when a song page has no lyrics root or could not be fetched
pub const MISSING_LYRICS: &str = "Missing lyrics";

const LYRICS_ROOT_SELECTOR: &str = "div#lyrics-root";
const CONTAINER_SELECTOR: &str = "div";
const CONTAINER_ATTR: &str = "data-lyrics-container";

/// Lyrics extracted for one song
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricsDocument {
    pub title: String,
    pub body: String,
}

impl LyricsDocument {
    /// The placeholder document for a song whose lyrics could not be read
    pub fn missing(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: MISSING_LYRICS.to_string(),
        }
    }

    pub fn is_missing(&self) -> bool {
        self.body == MISSING_LYRICS
    }
}

/// Builds the lyrics document for a fetched song page
///
/// Falls back to [`LyricsDocument::missing`] when the page has no lyrics root.
pub fn lyrics_stage(document: &Html, song: &SongContext) -> LyricsDocument {
    match extract_lyrics(document) {
        Some(body) => LyricsDocument {
            title: song.title.clone(),
            body,
        },
        None => {
            tracing::warn!("No lyrics root on the page for '{}'", song.title);
            LyricsDocument::missing(song.title.clone())
        }
    }
}

/// Extracts the lyrics text from a song page
///
/// Every `div` below the lyrics root whose `data-lyrics-container` attribute
/// is `true` (any case) contributes its text, in document order, with no
/// separator between containers.
///
/// # Returns
///
/// * `Some(String)` - The concatenated lyrics; empty if the root has no containers
/// * `None` - The page has no lyrics root
pub fn extract_lyrics(document: &Html) -> Option<String> {
    let root_selector = Selector::parse(LYRICS_ROOT_SELECTOR).ok()?;
    let container_selector = Selector::parse(CONTAINER_SELECTOR).ok()?;

    let root = document.select(&root_selector).next()?;

    let mut lyrics = String::new();
    for container in root.select(&container_selector) {
        let is_container = container
            .value()
            .attr(CONTAINER_ATTR)
            .is_some_and(|v| v.eq_ignore_ascii_case("true"));

        if is_container {
            render_container(container, &mut lyrics);
        }
    }

    Some(lyrics)
}

/// Appends the text of `element`'s children, skipping nested `div`s and
/// turning `<br>` into `\n`
fn render_container(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => match el.name() {
                "br" => out.push('\n'),
                "div" => {}
                _ => {
                    if let Some(child_ref) = ElementRef::wrap(child) {
                        render_container(child_ref, out);
                    }
                }
            },
            _ => {}
        }
    }
}
