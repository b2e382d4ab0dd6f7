//! Catalog pagination against a mock listing API

use crate::support::{catalog_json, mount_catalog_page};
use lyrics_harvest::catalog::fetch_catalog;
use lyrics_harvest::crawler::Fetcher;
use lyrics_harvest::output::{FailureKind, RunReport};
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher() -> Fetcher {
    Fetcher::new(reqwest::Client::new(), Duration::ZERO)
}

fn seed(server: &MockServer) -> Url {
    Url::parse(&format!(
        "{}/api/artists/455/albums?per_page=50&page=1",
        server.uri()
    ))
    .unwrap()
}

#[tokio::test]
async fn test_walks_pages_until_next_page_is_zero() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_catalog_page(
        &server,
        1,
        catalog_json(
            &[
                ("Rain Music", format!("{}/albums/rain-music", base), (2016, 3, 7)),
                ("Second Album", format!("{}/albums/second", base), (2017, 1, 2)),
            ],
            2,
        ),
    )
    .await;
    mount_catalog_page(
        &server,
        2,
        catalog_json(
            &[("Third Album", format!("{}/albums/third", base), (2019, 10, 11))],
            0,
        ),
    )
    .await;

    let mut report = RunReport::new();
    let albums = fetch_catalog(&mut fetcher(), &seed(&server), Some(100), &mut report).await;

    let names: Vec<&str> = albums.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Rain Music", "Second Album", "Third Album"]);
    assert_eq!(albums[0].release_date.to_string(), "2016-03-07");
    assert_eq!(report.catalog_pages, 2);
    assert!(!report.has_failures(), "Clean walk should record no failures");
}

#[tokio::test]
async fn test_page_bound_stops_endless_listing() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/api/artists/455/albums"))
        .respond_with(ResponseTemplate::new(200).set_body_string(catalog_json(
            &[("Looping", format!("{}/albums/looping", base), (2020, 1, 1))],
            9,
        )))
        .expect(3)
        .mount(&server)
        .await;

    let mut report = RunReport::new();
    let albums = fetch_catalog(&mut fetcher(), &seed(&server), Some(3), &mut report).await;

    assert_eq!(albums.len(), 3, "One album per fetched page");
    assert_eq!(report.catalog_pages, 3);
}

#[tokio::test]
async fn test_error_status_ends_walk_and_is_recorded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/artists/455/albums"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let mut report = RunReport::new();
    let albums = fetch_catalog(&mut fetcher(), &seed(&server), None, &mut report).await;

    assert!(albums.is_empty());
    assert_eq!(report.count(FailureKind::Status), 1);
    assert!(report.failures[0].message.contains("500"));
}

#[tokio::test]
async fn test_malformed_json_is_a_parse_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/artists/455/albums"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let mut report = RunReport::new();
    let albums = fetch_catalog(&mut fetcher(), &seed(&server), None, &mut report).await;

    assert!(albums.is_empty());
    assert_eq!(report.count(FailureKind::Parse), 1);
}

#[tokio::test]
async fn test_page_parameter_is_rewritten_in_place() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/api/artists/455/albums"))
        .and(query_param("per_page", "50"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(catalog_json(&[], 0)))
        .expect(1)
        .mount(&server)
        .await;
    mount_catalog_page(
        &server,
        1,
        catalog_json(
            &[("Rain Music", format!("{}/albums/rain-music", base), (2016, 3, 7))],
            2,
        ),
    )
    .await;

    let mut report = RunReport::new();
    let albums = fetch_catalog(&mut fetcher(), &seed(&server), None, &mut report).await;

    assert_eq!(albums.len(), 1);
    assert_eq!(report.catalog_pages, 2);
}
