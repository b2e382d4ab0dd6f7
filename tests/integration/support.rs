//! Shared fixtures for the integration tests

use lyrics_harvest::config::{parse_config, Config};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a config pointed at the mock server, with no request delay
pub fn harvest_config(catalog_section: &str, lyrics_dir: &str, crawler_extra: &str) -> Config {
    harvest_config_for_domains(
        catalog_section,
        lyrics_dir,
        &["127.0.0.1", "localhost"],
        crawler_extra,
    )
}

/// Like [`harvest_config`], with an explicit allowed-domains list
pub fn harvest_config_for_domains(
    catalog_section: &str,
    lyrics_dir: &str,
    allowed_domains: &[&str],
    crawler_extra: &str,
) -> Config {
    let domains: Vec<String> = allowed_domains
        .iter()
        .map(|d| format!("\"{}\"", d))
        .collect();

    parse_config(&format!(
        r#"
[catalog]
{}

[crawler]
request-delay = 0
request-timeout = 5
allowed-domains = [{}]
{}

[user-agent]
value = "LyricsHarvestTest/1.0"

[output]
lyrics-dir = "{}"
"#,
        catalog_section,
        domains.join(", "),
        crawler_extra,
        lyrics_dir
    ))
    .expect("test config should be valid")
}

/// JSON body of one catalog page
pub fn catalog_json(albums: &[(&str, String, (i32, u32, u32))], next_page: u32) -> String {
    let entries: Vec<String> = albums
        .iter()
        .map(|(name, url, (year, month, day))| {
            format!(
                r#"{{"name":"{}","url":"{}","release_date_components":{{"year":{},"month":{},"day":{}}}}}"#,
                name, url, year, month, day
            )
        })
        .collect();

    format!(
        r#"{{"meta":{{"status":200}},"response":{{"albums":[{}],"next_page":{}}}}}"#,
        entries.join(","),
        next_page
    )
}

/// Album page HTML; `None` hrefs produce a row without a link
pub fn album_html(rows: &[(Option<&str>, &str)]) -> String {
    let rows: Vec<String> = rows
        .iter()
        .enumerate()
        .map(|(i, (href, title))| {
            let inner = match href {
                Some(href) => format!(
                    r#"<a href="{}" class="u-display_block">
                         <h3 class="chart_row-content-title">{}
                           <span class="chart_row-content-title-subtitle">Lyrics</span>
                         </h3>
                       </a>"#,
                    href, title
                ),
                None => format!(r#"<h3 class="chart_row-content-title">{}</h3>"#, title),
            };
            format!(
                r#"<div class="chart_row">
                     <div class="chart_row-number_container">{}</div>
                     <div class="chart_row-content">{}</div>
                   </div>"#,
                i + 1,
                inner
            )
        })
        .collect();

    format!(
        "<html><head><title>Album</title></head><body><div class=\"tracklist\">{}</div></body></html>",
        rows.join("\n")
    )
}

/// Song page HTML with the given containers inside the lyrics root
pub fn song_html(containers: &[&str]) -> String {
    let containers: Vec<String> = containers
        .iter()
        .map(|c| format!(r#"<div data-lyrics-container="true">{}</div>"#, c))
        .collect();
    format!(
        r#"<html><body><main><div id="lyrics-root">{}</div></main></body></html>"#,
        containers.join("")
    )
}

pub async fn mount_html(server: &MockServer, page_path: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

pub async fn mount_status(server: &MockServer, page_path: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

pub async fn mount_catalog_page(server: &MockServer, page: u32, body: String) {
    Mock::given(method("GET"))
        .and(path("/api/artists/455/albums"))
        .and(query_param("page", page.to_string().as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "application/json"),
        )
        .mount(server)
        .await;
}
