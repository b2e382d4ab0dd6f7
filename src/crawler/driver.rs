//! Crawl driver - main harvest orchestration logic
//!
//! The driver runs the pipeline strictly sequentially:
//! 1. Discover albums (catalog listing or discography page)
//! 2. For each album, fetch its page and number its song rows
//! 3. For each song, fetch its page, extract lyrics, hand them to the sink
//! 4. Flush the run report
//!
//! One album is finished, songs included, before the next one starts, and
//! each album carries its own context, so no crawl state is shared between
//! albums.

use crate::catalog::fetch_catalog;
use crate::config::{CatalogSeed, Config};
use crate::crawler::{FetchResult, Fetcher};
use crate::output::{FailureKind, FileSink, LyricsSink, RunReport};
use crate::stages::{
    album_stage, discography_stage, lyrics_stage, AlbumVisit, LyricsDocument, SongVisit,
};
use crate::state::{CrawlPhase, SongContext};
use crate::url::DomainAllowList;
use crate::HarvestError;
use scraper::Html;
use std::collections::HashSet;
use url::Url;

/// Main harvest driver
pub struct CrawlDriver<S: LyricsSink> {
    config: Config,
    fetcher: Fetcher,
    sink: S,
    allow_list: DomainAllowList,
    visited: HashSet<String>,
    phase: CrawlPhase,
    report: RunReport,
}

impl<S: LyricsSink> CrawlDriver<S> {
    /// Creates a new driver writing through `sink`
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlDriver)` - Ready to run
    /// * `Err(HarvestError)` - The catalog entry point is invalid or the HTTP client could not be built
    pub fn new(config: Config, sink: S) -> Result<Self, HarvestError> {
        config.catalog.seed()?;

        let fetcher = Fetcher::from_config(&config.user_agent, &config.crawler)?;
        let allow_list = DomainAllowList::new(&config.crawler.allowed_domains);

        Ok(Self {
            config,
            fetcher,
            sink,
            allow_list,
            visited: HashSet::new(),
            phase: CrawlPhase::Idle,
            report: RunReport::new(),
        })
    }

    /// Current phase of the state machine
    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    /// Runs the whole harvest
    ///
    /// Page-level failures are recorded in the returned report and never
    /// abort the run. An `Err` means an internal invariant broke.
    pub async fn run(mut self) -> Result<RunReport, HarvestError> {
        tracing::info!("Starting harvest");

        let albums = self.discover_albums().await?;
        tracing::info!("{} albums scheduled", albums.len());

        for album in albums {
            self.visit_album(album).await?;
        }

        self.transition(CrawlPhase::Finished)?;
        self.report.requests_made = self.fetcher.requests_made();
        self.report.finish();

        tracing::info!(
            "Harvest completed: {} songs written ({} missing lyrics), {} failures",
            self.report.songs_written,
            self.report.songs_missing_lyrics,
            self.report.failures.len()
        );

        Ok(self.report)
    }

    /// Builds the album visit list from the configured catalog entry point
    async fn discover_albums(&mut self) -> Result<Vec<AlbumVisit>, HarvestError> {
        self.transition(CrawlPhase::FetchingCatalog)?;

        match self.config.catalog.seed()? {
            CatalogSeed::Api(seed) => {
                let descriptors = fetch_catalog(
                    &mut self.fetcher,
                    &seed,
                    self.config.catalog.page_limit(),
                    &mut self.report,
                )
                .await;
                Ok(descriptors.iter().map(AlbumVisit::from_descriptor).collect())
            }
            CatalogSeed::Discography {
                url,
                album_path_prefix,
            } => {
                let result = self.fetcher.get(&url).await;
                match result {
                    FetchResult::Success {
                        final_url, body, ..
                    } => {
                        self.report.catalog_pages += 1;
                        let document = Html::parse_document(&body);
                        Ok(discography_stage(&document, &final_url, &album_path_prefix))
                    }
                    failed => {
                        self.report.record_fetch_failure(&url, &failed);
                        Ok(Vec::new())
                    }
                }
            }
        }
    }

    /// Visits one album page and every song on it
    async fn visit_album(&mut self, album: AlbumVisit) -> Result<(), HarvestError> {
        let AlbumVisit {
            mut context,
            url,
        } = album;

        if !self.admit(&url) {
            return Ok(());
        }

        self.transition(CrawlPhase::VisitingAlbum)?;
        tracing::info!("Visiting album: {} ({})", context.album, url);

        let songs: Vec<SongVisit> = match self.fetcher.get(&url).await {
            FetchResult::Success {
                final_url, body, ..
            } => {
                let document = Html::parse_document(&body);
                album_stage(&document, &final_url, &mut context)
            }
            failed => {
                self.report.record_fetch_failure(&url, &failed);
                return Ok(());
            }
        };

        self.report.albums_visited += 1;
        tracing::debug!(
            "Album '{}': {} rows, {} songs to visit",
            context.album,
            context.track_number(),
            songs.len()
        );

        for song in songs {
            self.visit_song(song).await?;
        }

        Ok(())
    }

    /// Visits one song page and persists its lyrics
    ///
    /// A failed request still produces a file, with the missing-lyrics body.
    async fn visit_song(&mut self, song: SongVisit) -> Result<(), HarvestError> {
        let SongVisit { context, url } = song;

        if !self.admit(&url) {
            return Ok(());
        }

        self.transition(CrawlPhase::VisitingSong)?;
        tracing::info!(
            "Visiting song: {} (Track {})",
            context.title,
            context.track_number
        );

        let result = self.fetcher.get(&url).await;
        self.transition(CrawlPhase::ExtractingLyrics)?;

        let lyrics = match result {
            FetchResult::Success { body, .. } => {
                let document = Html::parse_document(&body);
                lyrics_stage(&document, &context)
            }
            failed => {
                self.report.record_fetch_failure(&url, &failed);
                LyricsDocument::missing(context.title.clone())
            }
        };

        self.persist(&context, &lyrics);
        Ok(())
    }

    /// Hands one song to the sink; write failures are recorded, not raised
    fn persist(&mut self, song: &SongContext, lyrics: &LyricsDocument) {
        if lyrics.is_missing() {
            self.report.songs_missing_lyrics += 1;
        }

        match self.sink.write_song(song, &lyrics.body) {
            Ok(path) => {
                self.report.songs_written += 1;
                tracing::info!("Wrote to file: {}", path.display());
            }
            Err(e) => {
                self.report.record(
                    FailureKind::Filesystem,
                    e.path().display().to_string(),
                    e.to_string(),
                );
            }
        }
    }

    /// Decides whether `url` may be fetched now
    ///
    /// Refuses domains outside the allow list and, unless revisits are
    /// enabled, URLs already fetched in this run.
    fn admit(&mut self, url: &Url) -> bool {
        if !self.allow_list.allows(url) {
            tracing::debug!("Skipping {}: domain not allowed", url);
            self.report.links_skipped += 1;
            return false;
        }

        if !self.config.crawler.allow_revisit && !self.visited.insert(url.to_string()) {
            tracing::debug!("Skipping {}: already visited", url);
            self.report.links_skipped += 1;
            return false;
        }

        true
    }

    fn transition(&mut self, to: CrawlPhase) -> Result<(), HarvestError> {
        if !self.phase.can_transition_to(to) {
            return Err(HarvestError::InvalidTransition {
                from: self.phase,
                to,
            });
        }
        tracing::trace!("Phase {} -> {}", self.phase, to);
        self.phase = to;
        Ok(())
    }
}

/// Runs a complete harvest, writing lyrics files under `output.lyrics-dir`
///
/// # Example
///
/// ```no_run
/// use lyrics_harvest::config::load_config;
/// use lyrics_harvest::crawler::harvest;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("harvest.toml"))?;
/// let report = harvest(config).await?;
/// println!("{} songs written", report.songs_written);
/// # Ok(())
/// # }
/// ```
pub async fn harvest(config: Config) -> Result<RunReport, HarvestError> {
    let sink = FileSink::from_config(&config.output);
    CrawlDriver::new(config, sink)?.run().await
}
