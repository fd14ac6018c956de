#![cfg(feature = "live-tests")]

//! Live tests against the real provider.
//!
//! Gated behind the `live-tests` feature flag. Requires network access; the
//! provider's markup can change without notice, so failures here point at
//! extraction drift rather than pipeline bugs.
//!
//! ```bash
//! cargo test --features live-tests --test live_catalog -- --nocapture
//! ```

use track_dl::{CatalogClient, CatalogConfig, Config, HttpCatalogClient, TrackDownloader};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn live_search_returns_tracks_and_counters() {
    let catalog = HttpCatalogClient::new(CatalogConfig::default()).unwrap();

    let page = catalog.search("阿姐鼓", 1).await.unwrap();

    assert!(!page.tracks.is_empty(), "no tracks found");
    assert!(page.total_pages >= 1);
    println!(
        "{} tracks on page 1 ({} total, {} pages)",
        page.tracks.len(),
        page.total_tracks,
        page.total_pages
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn live_first_result_downloads() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.download.download_dir = dir.path().to_path_buf();
    let downloader = TrackDownloader::new(config).await.unwrap();

    let page = downloader.search("阿姐鼓", 1).await.unwrap();
    let first = page.tracks.into_iter().next().expect("no tracks found");
    let report = downloader.download_one(first).join().await.unwrap();

    let outcome = &report.tracks[0].outcome;
    println!("outcome: {outcome:?}");
    assert!(outcome.path().is_some(), "nothing was written: {outcome:?}");
}
