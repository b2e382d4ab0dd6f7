use url::Url;

use super::extract_domain;

/// Checks if a host matches a domain pattern
///
/// Two pattern forms are supported:
/// 1. Exact match: `genius.com` matches only `genius.com`
/// 2. Wildcard match: `*.genius.com` matches `genius.com` itself and any
///    subdomain of it (`images.genius.com`, `a.b.genius.com`)
///
/// Matching is case-insensitive.
///
/// # Examples
///
/// ```
/// use lyrics_harvest::url::matches_wildcard;
///
/// assert!(matches_wildcard("genius.com", "GENIUS.com"));
/// assert!(matches_wildcard("*.genius.com", "promo.genius.com"));
/// assert!(!matches_wildcard("*.genius.com", "notgenius.com"));
/// ```
pub fn matches_wildcard(pattern: &str, host: &str) -> bool {
    let pattern = pattern.to_ascii_lowercase();
    let host = host.to_ascii_lowercase();

    match pattern.strip_prefix("*.") {
        Some(base) => host == base || host.ends_with(&format!(".{}", base)),
        None => host == pattern,
    }
}

/// The set of domains the crawler may fetch from
///
/// An empty list allows every domain.
#[derive(Debug, Clone, Default)]
pub struct DomainAllowList {
    patterns: Vec<String>,
}

impl DomainAllowList {
    pub fn new(patterns: &[String]) -> Self {
        Self {
            patterns: patterns.to_vec(),
        }
    }

    /// Returns true if `url` may be fetched
    pub fn allows(&self, url: &Url) -> bool {
        if self.patterns.is_empty() {
            return true;
        }

        match extract_domain(url) {
            Some(host) => self.patterns.iter().any(|p| matches_wildcard(p, &host)),
            None => false,
        }
    }
}
