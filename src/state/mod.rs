//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlPhase`: where the driver is in the album/song state machine
//! - `AlbumContext` / `SongContext`: per-album and per-song crawl context
//! - `DomainState`: per-domain request timing for the throttle

mod context;
mod domain_state;
mod phase;

pub use context::{AlbumContext, SongContext};
pub use domain_state::DomainState;
pub use phase::CrawlPhase;
