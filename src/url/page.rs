use url::Url;

/// Name of the query parameter carrying the catalog page number
pub const PAGE_PARAM: &str = "page";

/// Returns `seed` with its `page` query value set to `page`
///
/// Every other query pair is kept, in order. If the seed has no `page`
/// parameter it is appended.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use lyrics_harvest::url::with_page_number;
///
/// let seed = Url::parse("https://genius.com/api/artists/455/albums?page=1&per_page=50").unwrap();
/// assert_eq!(
///     with_page_number(&seed, 3).as_str(),
///     "https://genius.com/api/artists/455/albums?page=3&per_page=50"
/// );
/// ```
pub fn with_page_number(seed: &Url, page: u32) -> Url {
    let mut found = false;
    let pairs: Vec<(String, String)> = seed
        .query_pairs()
        .map(|(key, value)| {
            if key == PAGE_PARAM {
                found = true;
                (key.into_owned(), page.to_string())
            } else {
                (key.into_owned(), value.into_owned())
            }
        })
        .collect();

    let mut url = seed.clone();
    {
        let mut query = url.query_pairs_mut();
        query.clear();
        for (key, value) in &pairs {
            query.append_pair(key, value);
        }
        if !found {
            query.append_pair(PAGE_PARAM, &page.to_string());
        }
    }
    url
}

/// Extracts the lowercase host of a URL
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Resolves a link href against the page it was found on
///
/// Returns None if the link should not be followed:
/// - empty hrefs and fragment-only anchors
/// - javascript:, mailto:, tel: and data: links
/// - anything that is not HTTP(S) after resolution
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let absolute = base_url.join(href).ok()?;
    match absolute.scheme() {
        "http" | "https" => Some(absolute),
        _ => None,
    }
}
