//! Catalog paginator
//!
//! Walks the page-numbered album listing from page 1 until a page reports no
//! successor, accumulating album descriptors in fetch order.

use crate::catalog::types::{AlbumDescriptor, CatalogPage};
use crate::crawler::{FetchResult, Fetcher};
use crate::output::{FailureKind, RunReport};
use crate::url::with_page_number;
use url::Url;

/// Fetches every catalog page reachable from `seed`
///
/// Page N is requested as the seed URL with its `page` parameter set to N,
/// starting at 1. A page whose `next_page` is missing, null or zero ends the
/// walk. A page that fails to fetch or decode is recorded in `report` and
/// counts as an empty final page.
///
/// `max_pages` caps the walk; `None` keeps going for as long as the listing
/// claims another page exists.
///
/// # Returns
///
/// All album descriptors, in the order the listing returned them
pub async fn fetch_catalog(
    fetcher: &mut Fetcher,
    seed: &Url,
    max_pages: Option<u32>,
    report: &mut RunReport,
) -> Vec<AlbumDescriptor> {
    let mut albums = Vec::new();
    let mut page_number: u32 = 1;

    loop {
        let page_url = with_page_number(seed, page_number);
        let page = fetch_catalog_page(fetcher, &page_url, report).await;
        report.catalog_pages += 1;

        tracing::info!(
            "Catalog page {}: {} albums, next page {:?}",
            page_number,
            page.albums.len(),
            page.next_page
        );
        let has_next = page.has_next();
        albums.extend(page.albums);

        if !has_next {
            break;
        }

        if max_pages.is_some_and(|limit| page_number >= limit) {
            tracing::warn!(
                "Stopping catalog walk at the {} page bound; the listing still reports more pages",
                page_number
            );
            break;
        }

        page_number += 1;
    }

    tracing::info!("Catalog complete: {} albums", albums.len());
    albums
}

/// Fetches and decodes one catalog page
///
/// Any failure is recorded and yields [`CatalogPage::empty`].
pub async fn fetch_catalog_page(
    fetcher: &mut Fetcher,
    page_url: &Url,
    report: &mut RunReport,
) -> CatalogPage {
    match fetcher.get(page_url).await {
        FetchResult::Success { body, .. } => match CatalogPage::from_json(&body) {
            Ok(page) => page,
            Err(e) => {
                report.record(
                    FailureKind::Parse,
                    page_url.as_str(),
                    format!("error decoding catalog JSON: {}", e),
                );
                CatalogPage::empty()
            }
        },
        failed => {
            report.record_fetch_failure(page_url, &failed);
            CatalogPage::empty()
        }
    }
}
