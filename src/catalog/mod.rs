//! Artist catalog: the album listing that seeds a harvest
//!
//! - `types`: wire decoding of catalog pages into [`AlbumDescriptor`]s
//! - `paginator`: the page-by-page walk over the listing endpoint

mod paginator;
mod types;

pub use paginator::{fetch_catalog, fetch_catalog_page};
pub use types::{AlbumDescriptor, CatalogPage, ReleaseDate};
