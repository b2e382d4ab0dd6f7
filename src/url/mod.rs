//! URL handling module
//!
//! Page-number rewriting for the catalog listing, link resolution for
//! album and song rows, and the allowed-domain list.

mod matcher;
mod page;

pub use matcher::{matches_wildcard, DomainAllowList};
pub use page::{extract_domain, resolve_link, with_page_number, PAGE_PARAM};
