use serde::Deserialize;
use url::Url;

use crate::ConfigError;

/// Browser-like agent string sent when the config does not name one
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14.4; rv:124.0) Gecko/20100101 Firefox/124.0";

/// Main configuration structure for a harvest run
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where the list of albums comes from
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Paginated JSON album listing; the `page` query parameter is rewritten per page
    #[serde(rename = "api-url", default)]
    pub api_url: Option<String>,

    /// Discography HTML page listing the artist's albums
    #[serde(rename = "discography-url", default)]
    pub discography_url: Option<String>,

    /// Path prefix an album link must carry to count as one of this artist's albums
    #[serde(rename = "album-path-prefix", default)]
    pub album_path_prefix: Option<String>,

    /// Upper bound on catalog pages fetched; 0 disables the bound
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: u32,
}

/// The resolved catalog entry point
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSeed {
    /// Paginated JSON listing
    Api(Url),
    /// Discography page plus the album path prefix used to filter its links
    Discography { url: Url, album_path_prefix: String },
}

impl CatalogConfig {
    /// Resolves the configured entry point
    ///
    /// Exactly one of `api-url` and `discography-url` must be set.
    pub fn seed(&self) -> Result<CatalogSeed, ConfigError> {
        match (&self.api_url, &self.discography_url) {
            (Some(api), None) => Ok(CatalogSeed::Api(parse_http_url("api-url", api)?)),
            (None, Some(page)) => {
                let url = parse_http_url("discography-url", page)?;
                let prefix = self
                    .album_path_prefix
                    .clone()
                    .filter(|p| !p.is_empty())
                    .ok_or_else(|| {
                        ConfigError::Validation(
                            "album-path-prefix is required with discography-url".to_string(),
                        )
                    })?;
                Ok(CatalogSeed::Discography {
                    url,
                    album_path_prefix: prefix,
                })
            }
            (Some(_), Some(_)) => Err(ConfigError::Validation(
                "api-url and discography-url are mutually exclusive".to_string(),
            )),
            (None, None) => Err(ConfigError::Validation(
                "one of api-url or discography-url must be set".to_string(),
            )),
        }
    }

    /// The page bound as an `Option`, `None` meaning unbounded
    pub fn page_limit(&self) -> Option<u32> {
        (self.max_pages > 0).then_some(self.max_pages)
    }
}

fn parse_http_url(field: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, raw, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            field, raw
        )));
    }

    Ok(url)
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Minimum time between requests to the same domain (milliseconds)
    #[serde(rename = "request-delay", default = "default_request_delay")]
    pub request_delay: u64,

    /// Whole-request timeout (seconds)
    #[serde(rename = "request-timeout", default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Domain patterns pages may be fetched from; empty allows every domain
    #[serde(rename = "allowed-domains", default)]
    pub allowed_domains: Vec<String>,

    /// Fetch a URL again when it shows up a second time in one run
    #[serde(rename = "allow-revisit", default)]
    pub allow_revisit: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            request_delay: default_request_delay(),
            request_timeout: default_request_timeout(),
            allowed_domains: Vec::new(),
            allow_revisit: false,
        }
    }
}

/// User agent configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    #[serde(default = "default_user_agent")]
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: default_user_agent(),
        }
    }
}

/// How lyrics files are laid out under the output directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// `<album> (<date>)/<track> <title>.txt`
    #[default]
    Nested,
    /// `<title>.txt`
    Flat,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Root directory for lyrics files
    #[serde(rename = "lyrics-dir", default = "default_lyrics_dir")]
    pub lyrics_dir: String,

    #[serde(default)]
    pub layout: Layout,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            lyrics_dir: default_lyrics_dir(),
            layout: Layout::default(),
        }
    }
}

fn default_max_pages() -> u32 {
    100
}

fn default_request_delay() -> u64 {
    1000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_lyrics_dir() -> String {
    "./lyrics".to_string()
}
