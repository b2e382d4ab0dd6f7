//! Discography stage: album list entries to album visits

use crate::catalog::AlbumDescriptor;
use crate::state::AlbumContext;
use crate::url::resolve_link;
use scraper::{Html, Selector};
use url::Url;

const ENTRY_SELECTOR: &str = "li";
const LINK_SELECTOR: &str = "a[href]";

/// An album page scheduled for a visit, with its fresh context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumVisit {
    pub context: AlbumContext,
    pub url: Url,
}

impl AlbumVisit {
    /// Schedules a catalog-listed album
    pub fn from_descriptor(descriptor: &AlbumDescriptor) -> Self {
        Self {
            context: AlbumContext::from_descriptor(descriptor),
            url: descriptor.url.clone(),
        }
    }
}

/// Extracts this artist's albums from a discography page
///
/// Each `li` whose first link resolves to a path starting with
/// `album_path_prefix` becomes one album visit, named after the link text.
/// Entries without a link, with an empty name, or pointing outside the
/// prefix are skipped. Order is document order.
pub fn discography_stage(
    document: &Html,
    page_url: &Url,
    album_path_prefix: &str,
) -> Vec<AlbumVisit> {
    let (Ok(entry_selector), Ok(link_selector)) =
        (Selector::parse(ENTRY_SELECTOR), Selector::parse(LINK_SELECTOR))
    else {
        return Vec::new();
    };

    document
        .select(&entry_selector)
        .filter_map(|entry| {
            let link = entry.select(&link_selector).next()?;
            let url = resolve_link(link.value().attr("href")?, page_url)?;

            if !url.path().starts_with(album_path_prefix) {
                tracing::trace!("Skipping non-album entry {}", url);
                return None;
            }

            let name = link.text().collect::<Vec<_>>().join(" ");
            let name = name.split_whitespace().collect::<Vec<_>>().join(" ");
            if name.is_empty() {
                return None;
            }

            Some(AlbumVisit {
                context: AlbumContext::new(name, None),
                url,
            })
        })
        .collect()
}
