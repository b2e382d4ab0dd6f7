use serde::Deserialize;
use std::fmt;
use url::Url;

/// Release date as reported by the catalog
///
/// Components the catalog leaves null decode as zero, so a date always
/// formats, e.g. `2016-00-00` for a year-only release.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "RawReleaseDate")]
pub struct ReleaseDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

#[derive(Deserialize)]
struct RawReleaseDate {
    #[serde(default)]
    year: Option<i32>,
    #[serde(default)]
    month: Option<u32>,
    #[serde(default)]
    day: Option<u32>,
}

impl From<RawReleaseDate> for ReleaseDate {
    fn from(raw: RawReleaseDate) -> Self {
        Self {
            year: raw.year.unwrap_or(0),
            month: raw.month.unwrap_or(0),
            day: raw.day.unwrap_or(0),
        }
    }
}

impl ReleaseDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }
}

impl fmt::Display for ReleaseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// One album entry from the catalog listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumDescriptor {
    pub name: String,
    /// Fully-qualified album page address
    pub url: Url,
    pub release_date: ReleaseDate,
}

/// One decoded page of the catalog listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogPage {
    pub albums: Vec<AlbumDescriptor>,
    /// Next page number; `None` (or zero on the wire) ends pagination
    pub next_page: Option<u32>,
}

#[derive(Deserialize)]
struct Envelope {
    response: RawPage,
}

#[derive(Deserialize)]
struct RawPage {
    #[serde(default)]
    albums: Option<Vec<RawAlbum>>,
    #[serde(default)]
    next_page: Option<u32>,
}

#[derive(Deserialize)]
struct RawAlbum {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    release_date_components: Option<ReleaseDate>,
}

impl CatalogPage {
    /// The page that ends pagination without contributing albums
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decodes a catalog response body
    ///
    /// Expects `{ "response": { "albums": [...], "next_page": N } }`.
    /// Album entries without a name or a parseable absolute URL are dropped
    /// with a warning; a body that does not have this shape is an error.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let envelope: Envelope = serde_json::from_str(body)?;
        let raw = envelope.response;

        let albums = raw
            .albums
            .unwrap_or_default()
            .into_iter()
            .filter_map(|album| {
                let name = album.name.filter(|n| !n.trim().is_empty())?;
                let url = match album.url.as_deref().map(Url::parse) {
                    Some(Ok(url)) => url,
                    Some(Err(e)) => {
                        tracing::warn!("Dropping album '{}' with bad URL: {}", name, e);
                        return None;
                    }
                    None => {
                        tracing::warn!("Dropping album '{}' without URL", name);
                        return None;
                    }
                };
                Some(AlbumDescriptor {
                    name,
                    url,
                    release_date: album.release_date_components.unwrap_or_default(),
                })
            })
            .collect();

        Ok(Self {
            albums,
            next_page: raw.next_page.filter(|&n| n != 0),
        })
    }

    /// Returns true if another page follows this one
    pub fn has_next(&self) -> bool {
        self.next_page.is_some()
    }
}
