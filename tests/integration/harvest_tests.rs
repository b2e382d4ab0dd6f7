//! End-to-end harvests into a temporary lyrics directory

use crate::support::{
    album_html, catalog_json, harvest_config, harvest_config_for_domains, mount_catalog_page,
    mount_html, mount_status, song_html,
};
use lyrics_harvest::crawler::harvest;
use lyrics_harvest::output::FailureKind;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_section(server: &MockServer) -> String {
    format!(
        r#"api-url = "{}/api/artists/455/albums?page=1""#,
        server.uri()
    )
}

/// Mounts a one-album catalog whose album page has the given rows
async fn mount_single_album(server: &MockServer, rows: &[(Option<&str>, &str)]) {
    mount_catalog_page(
        server,
        1,
        catalog_json(
            &[(
                "Rain Music",
                format!("{}/albums/rain-music", server.uri()),
                (2016, 3, 7),
            )],
            0,
        ),
    )
    .await;
    mount_html(server, "/albums/rain-music", album_html(rows)).await;
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative))
        .unwrap_or_else(|e| panic!("expected {} to exist: {}", relative, e))
}

#[tokio::test]
async fn test_full_harvest_writes_one_file_per_row() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    mount_single_album(
        &server,
        &[
            (Some("/songs/intro"), "Intro"),
            (Some("/songs/gone"), "Gone"),
            (Some("/songs/menthol"), "Menthol"),
            (Some("/songs/silence"), "Silence"),
        ],
    )
    .await;
    mount_html(&server, "/songs/intro", song_html(&["Hello<br>World"])).await;
    mount_status(&server, "/songs/gone", 404).await;
    mount_html(&server, "/songs/menthol", song_html(&["Verse 1", "Verse 2"])).await;
    mount_html(
        &server,
        "/songs/silence",
        "<html><body><p>Nothing here</p></body></html>".to_string(),
    )
    .await;

    let config = harvest_config(&api_section(&server), &out.path().display().to_string(), "");
    let report = harvest(config).await.unwrap();

    let root = out.path();
    assert_eq!(
        read(root, "Rain Music (2016-03-07)/1 Intro.txt"),
        "Intro\n\nHello\nWorld"
    );
    assert_eq!(
        read(root, "Rain Music (2016-03-07)/2 Gone.txt"),
        "Gone\n\nMissing lyrics"
    );
    let menthol = read(root, "Rain Music (2016-03-07)/3 Menthol.txt");
    assert!(menthol.starts_with("Menthol\n\n"));
    assert_eq!(menthol, "Menthol\n\nVerse 1Verse 2");
    assert_eq!(
        read(root, "Rain Music (2016-03-07)/4 Silence.txt"),
        "Silence\n\nMissing lyrics"
    );

    assert_eq!(report.catalog_pages, 1);
    assert_eq!(report.albums_visited, 1);
    assert_eq!(report.songs_written, 4);
    assert_eq!(report.songs_missing_lyrics, 2);
    assert_eq!(report.requests_made, 6, "catalog + album + four songs");
    assert_eq!(report.count(FailureKind::Status), 1);
    assert!(report.failures[0].target.ends_with("/songs/gone"));
    assert!(report.finished_at.is_some());
}

#[tokio::test]
async fn test_rerun_reproduces_identical_files() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    mount_single_album(
        &server,
        &[
            (Some("/songs/intro"), "Intro"),
            (Some("/songs/menthol"), "Menthol"),
        ],
    )
    .await;
    mount_html(&server, "/songs/intro", song_html(&["Hello<br>World"])).await;
    mount_html(&server, "/songs/menthol", song_html(&["Verse 1", "Verse 2"])).await;

    let lyrics_dir = out.path().display().to_string();
    harvest(harvest_config(&api_section(&server), &lyrics_dir, ""))
        .await
        .unwrap();
    let first_intro = fs::read(out.path().join("Rain Music (2016-03-07)/1 Intro.txt")).unwrap();
    let first_menthol =
        fs::read(out.path().join("Rain Music (2016-03-07)/2 Menthol.txt")).unwrap();

    harvest(harvest_config(&api_section(&server), &lyrics_dir, ""))
        .await
        .unwrap();

    assert_eq!(
        fs::read(out.path().join("Rain Music (2016-03-07)/1 Intro.txt")).unwrap(),
        first_intro
    );
    assert_eq!(
        fs::read(out.path().join("Rain Music (2016-03-07)/2 Menthol.txt")).unwrap(),
        first_menthol
    );
}

#[tokio::test]
async fn test_discography_mode_filters_album_links() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    mount_html(
        &server,
        "/artists/someone/albums",
        r#"<html><body><ul>
             <li><a href="/albums/someone/rain-music">Rain
                 Music</a></li>
             <li><a href="/artists/someone">Artist page</a></li>
             <li>No link at all</li>
           </ul></body></html>"#
            .to_string(),
    )
    .await;
    mount_html(
        &server,
        "/albums/someone/rain-music",
        album_html(&[(Some("/songs/menthol"), "Menthol")]),
    )
    .await;
    mount_html(&server, "/songs/menthol", song_html(&["Verse 1"])).await;

    let catalog = format!(
        "discography-url = \"{}/artists/someone/albums\"\nalbum-path-prefix = \"/albums/\"",
        server.uri()
    );
    let config = harvest_config(&catalog, &out.path().display().to_string(), "");
    let report = harvest(config).await.unwrap();

    assert_eq!(
        read(out.path(), "Rain Music/1 Menthol.txt"),
        "Menthol\n\nVerse 1"
    );
    assert_eq!(report.catalog_pages, 1);
    assert_eq!(report.albums_visited, 1);
    assert_eq!(report.songs_written, 1);
}

#[tokio::test]
async fn test_foreign_song_link_keeps_its_track_number() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    mount_single_album(
        &server,
        &[
            (Some("https://elsewhere.example/songs/away"), "Away"),
            (None, "Unlinked"),
            (Some("/songs/local"), "Local"),
        ],
    )
    .await;
    mount_html(&server, "/songs/local", song_html(&["Home"])).await;

    let config = harvest_config(&api_section(&server), &out.path().display().to_string(), "");
    let report = harvest(config).await.unwrap();

    let album_dir = out.path().join("Rain Music (2016-03-07)");
    assert_eq!(read(&album_dir, "3 Local.txt"), "Local\n\nHome");
    assert!(!album_dir.join("1 Away.txt").exists());
    assert_eq!(fs::read_dir(&album_dir).unwrap().count(), 1);
    assert_eq!(report.links_skipped, 1);
    assert_eq!(report.songs_written, 1);
}

#[tokio::test]
async fn test_repeated_song_link_is_fetched_once() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    mount_single_album(
        &server,
        &[
            (Some("/songs/menthol"), "Menthol"),
            (Some("/songs/menthol"), "Menthol (Reprise)"),
        ],
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/songs/menthol"))
        .respond_with(ResponseTemplate::new(200).set_body_string(song_html(&["Verse 1"])))
        .expect(1)
        .mount(&server)
        .await;

    let config = harvest_config(&api_section(&server), &out.path().display().to_string(), "");
    let report = harvest(config).await.unwrap();

    assert_eq!(report.songs_written, 1);
    assert_eq!(report.links_skipped, 1);
}

#[tokio::test]
async fn test_failed_album_fetch_is_recorded_and_writes_nothing() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    mount_catalog_page(
        &server,
        1,
        catalog_json(
            &[
                ("Broken", format!("{}/albums/broken", server.uri()), (2015, 1, 1)),
                ("Rain Music", format!("{}/albums/rain-music", server.uri()), (2016, 3, 7)),
            ],
            0,
        ),
    )
    .await;
    mount_status(&server, "/albums/broken", 500).await;
    mount_html(
        &server,
        "/albums/rain-music",
        album_html(&[(Some("/songs/menthol"), "Menthol")]),
    )
    .await;
    mount_html(&server, "/songs/menthol", song_html(&["Verse 1"])).await;

    let config = harvest_config(&api_section(&server), &out.path().display().to_string(), "");
    let report = harvest(config).await.unwrap();

    assert!(!out.path().join("Broken (2015-01-01)").exists());
    assert_eq!(
        read(out.path(), "Rain Music (2016-03-07)/1 Menthol.txt"),
        "Menthol\n\nVerse 1"
    );
    assert_eq!(report.albums_visited, 1);
    assert_eq!(report.count(FailureKind::Status), 1);
    assert!(report.failures[0].target.ends_with("/albums/broken"));
}

#[tokio::test]
async fn test_redirect_to_disallowed_host_writes_missing_lyrics() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();
    let port = server.address().port();

    mount_single_album(&server, &[(Some("/songs/menthol"), "Menthol")]).await;
    Mock::given(method("GET"))
        .and(path("/songs/menthol"))
        .respond_with(
            ResponseTemplate::new(302).insert_header(
                "location",
                format!("http://localhost:{}/foreign/page", port).as_str(),
            ),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/foreign/page"))
        .respond_with(ResponseTemplate::new(200).set_body_string(song_html(&["Off-domain text"])))
        .expect(0)
        .mount(&server)
        .await;

    let config = harvest_config_for_domains(
        &api_section(&server),
        &out.path().display().to_string(),
        &["127.0.0.1"],
        "",
    );
    let report = harvest(config).await.unwrap();

    assert_eq!(
        read(out.path(), "Rain Music (2016-03-07)/1 Menthol.txt"),
        "Menthol\n\nMissing lyrics",
        "Off-domain redirect target must not be extracted"
    );
    assert_eq!(report.songs_missing_lyrics, 1);
    assert_eq!(report.count(FailureKind::Transport), 1);
    assert!(report.failures[0].message.contains("disallowed host"));
}

#[tokio::test]
async fn test_redirect_within_allowed_host_is_followed() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    mount_single_album(&server, &[(Some("/songs/moved"), "Menthol")]).await;
    Mock::given(method("GET"))
        .and(path("/songs/moved"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("location", format!("{}/songs/menthol", server.uri()).as_str()),
        )
        .mount(&server)
        .await;
    mount_html(&server, "/songs/menthol", song_html(&["Verse 1"])).await;

    let config = harvest_config_for_domains(
        &api_section(&server),
        &out.path().display().to_string(),
        &["127.0.0.1"],
        "",
    );
    let report = harvest(config).await.unwrap();

    assert_eq!(
        read(out.path(), "Rain Music (2016-03-07)/1 Menthol.txt"),
        "Menthol\n\nVerse 1"
    );
    assert!(!report.has_failures());
}

#[tokio::test]
async fn test_unreachable_song_writes_missing_lyrics() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    // Nothing listens on the discard port.
    mount_single_album(
        &server,
        &[
            (Some("http://127.0.0.1:9/songs/closed"), "Closed"),
            (Some("/songs/menthol"), "Menthol"),
        ],
    )
    .await;
    mount_html(&server, "/songs/menthol", song_html(&["Verse 1"])).await;

    let config = harvest_config(&api_section(&server), &out.path().display().to_string(), "");
    let report = harvest(config).await.unwrap();

    assert_eq!(
        read(out.path(), "Rain Music (2016-03-07)/1 Closed.txt"),
        "Closed\n\nMissing lyrics"
    );
    assert_eq!(
        read(out.path(), "Rain Music (2016-03-07)/2 Menthol.txt"),
        "Menthol\n\nVerse 1"
    );
    assert_eq!(report.count(FailureKind::Transport), 1);
    assert!(report.failures[0].target.starts_with("http://127.0.0.1:9/"));
    assert_eq!(report.songs_written, 2);
    assert_eq!(report.songs_missing_lyrics, 1);
}

#[tokio::test]
async fn test_write_error_is_recorded_and_crawl_continues() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    mount_catalog_page(
        &server,
        1,
        catalog_json(
            &[
                ("Blocked", format!("{}/albums/blocked", server.uri()), (2015, 1, 1)),
                ("Rain Music", format!("{}/albums/rain-music", server.uri()), (2016, 3, 7)),
            ],
            0,
        ),
    )
    .await;
    mount_html(
        &server,
        "/albums/blocked",
        album_html(&[(Some("/songs/blocked"), "Blocked Song")]),
    )
    .await;
    mount_html(&server, "/songs/blocked", song_html(&["Never written"])).await;
    mount_html(
        &server,
        "/albums/rain-music",
        album_html(&[(Some("/songs/menthol"), "Menthol")]),
    )
    .await;
    mount_html(&server, "/songs/menthol", song_html(&["Verse 1"])).await;

    // A plain file where the album directory should go.
    fs::write(out.path().join("Blocked (2015-01-01)"), "not a directory").unwrap();

    let config = harvest_config(&api_section(&server), &out.path().display().to_string(), "");
    let report = harvest(config).await.unwrap();

    assert_eq!(report.count(FailureKind::Filesystem), 1);
    assert!(report.failures[0].target.contains("Blocked (2015-01-01)"));
    assert_eq!(report.songs_written, 1);
    assert_eq!(
        read(out.path(), "Rain Music (2016-03-07)/1 Menthol.txt"),
        "Menthol\n\nVerse 1"
    );
}
