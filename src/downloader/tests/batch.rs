use super::*;
use crate::error::ErrorKind;
use crate::types::PipelineOutcome;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn payload_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ok.mp3"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"mp3".to_vec()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken.mp3"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn partial_failure_is_reported_without_stopping_the_batch() {
    let server = payload_server().await;
    let catalog = StubCatalog::default()
        .with("1", detail("First", format!("{}/ok.mp3", server.uri()), None))
        .with("2", detail("Second", format!("{}/broken.mp3", server.uri()), None))
        .with("4", detail("Fourth", format!("{}/ok.mp3", server.uri()), None));
    let dir = tempfile::tempdir().unwrap();
    let dl = downloader_with(dir.path(), catalog, no_ffmpeg()).await;

    let handle = dl.download_batch(vec![
        TrackSummary::new("First", "1"),
        TrackSummary::new("Second", "2"),
        TrackSummary::new("Third (delisted)", "3"),
        TrackSummary::new("Fourth", "4"),
    ]);
    assert_eq!(handle.len(), 4);
    let report = handle.join().await.unwrap();

    assert_eq!(report.succeeded, 2);
    assert_eq!(
        report.failed_titles,
        vec!["Second".to_string(), "Third (delisted)".to_string()]
    );
    assert_eq!(report.tracks[1].outcome.error_kind(), Some(ErrorKind::Network));
    assert_eq!(report.tracks[2].outcome.error_kind(), Some(ErrorKind::Parse));
    assert_eq!(listing(dir.path()), vec!["First.mp3", "Fourth.mp3"]);
}

#[tokio::test]
async fn catalog_failure_detail_carries_provider_response() {
    let dir = tempfile::tempdir().unwrap();
    let dl = downloader_with(dir.path(), StubCatalog::default(), no_ffmpeg()).await;

    let report = dl
        .process_track(&TrackSummary::new("Gone", "missing"), dir.path())
        .await;

    match report.outcome {
        PipelineOutcome::Failed { kind, detail, preserved } => {
            assert_eq!(kind, ErrorKind::Parse);
            assert!(detail.contains(r#"{"msg":0}"#));
            assert_eq!(preserved, None);
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn rerunning_a_batch_skips_committed_tracks() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ok.mp3"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"mp3".to_vec()))
        .expect(1)
        .mount(&server)
        .await;
    let catalog =
        StubCatalog::default().with("1", detail("Song", format!("{}/ok.mp3", server.uri()), None));
    let dir = tempfile::tempdir().unwrap();
    let dl = downloader_with(dir.path(), catalog, no_ffmpeg()).await;
    let tracks = vec![TrackSummary::new("Song", "1")];

    let first = dl.download_batch(tracks.clone()).join().await.unwrap();
    let second = dl.download_batch(tracks).join().await.unwrap();

    assert!(matches!(first.tracks[0].outcome, PipelineOutcome::Committed(_)));
    assert!(matches!(
        second.tracks[0].outcome,
        PipelineOutcome::SkippedExisting(_)
    ));
    assert_eq!(second.succeeded, 1);
}

#[tokio::test]
async fn download_one_and_explicit_target_directory() {
    let server = payload_server().await;
    let catalog =
        StubCatalog::default().with("1", detail("Song", format!("{}/ok.mp3", server.uri()), None));
    let dir = tempfile::tempdir().unwrap();
    let dl = downloader_with(&dir.path().join("default"), catalog, no_ffmpeg()).await;
    let elsewhere = dir.path().join("elsewhere");

    let one = dl
        .download_one(TrackSummary::new("Song", "1"))
        .join()
        .await
        .unwrap();
    let to = dl
        .download_batch_to(vec![TrackSummary::new("Song", "1")], elsewhere.clone())
        .join()
        .await
        .unwrap();

    assert_eq!(one.tracks[0].outcome.path(), Some(dl.download_dir().join("Song.mp3").as_path()));
    assert_eq!(to.tracks[0].outcome.path(), Some(elsewhere.join("Song.mp3").as_path()));
}

#[tokio::test]
async fn empty_batch_reports_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let dl = downloader_with(dir.path(), StubCatalog::default(), no_ffmpeg()).await;

    let handle = dl.download_batch(Vec::new());
    assert!(handle.is_empty());
    let report = handle.join().await.unwrap();

    assert_eq!(report.succeeded, 0);
    assert!(report.failed_titles.is_empty());
    assert!(report.tracks.is_empty());
}

#[tokio::test]
async fn facade_delegates_search_and_resolution_to_catalog() {
    let catalog = StubCatalog::default().with("9", detail("Nine", "http://cdn/9.mp3".into(), None));
    let dir = tempfile::tempdir().unwrap();
    let dl = downloader_with(dir.path(), catalog, ffmpeg_ok()).await;

    let page = dl.search("nine", 1).await.unwrap();
    let resolved = dl.fetch_track(&page.tracks[0].id).await.unwrap();

    assert_eq!(page.total_tracks, 1);
    assert_eq!(resolved.title, "Nine");
    assert!(dl.remux_available());
}

#[tokio::test]
async fn new_rejects_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.download.download_dir = dir.path().to_path_buf();
    config.catalog.base_url = "ftp://example.com".into();

    let result = TrackDownloader::new(config).await;

    assert!(matches!(result, Err(crate::Error::Config { .. })));
}

#[tokio::test]
async fn new_without_ffmpeg_falls_back_to_noop() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.download.download_dir = dir.path().join("dl");
    config.tools.search_path = false;

    let dl = TrackDownloader::new(config).await.unwrap();

    assert!(!dl.remux_available());
    assert!(dl.download_dir().is_dir());
}
