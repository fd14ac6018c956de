//! Common test utilities for track-dl integration tests

#[allow(dead_code)]
pub mod assertions;
#[allow(dead_code)]
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::{Path, PathBuf};
use std::time::Duration;
use track_dl::{Config, TrackDownloader};
use wiremock::MockServer;

/// Config pointing the catalog at `server` and downloads into `download_dir`
pub fn config_for(server: &MockServer, download_dir: &Path) -> Config {
    let mut config = Config::default();
    config.catalog.base_url = server.uri();
    config.catalog.search_timeout = Duration::from_secs(5);
    config.catalog.detail_timeout = Duration::from_secs(5);
    config.download.download_dir = download_dir.to_path_buf();
    config.download.payload_timeout = Duration::from_secs(5);
    config
}

/// Downloader using the real HTTP catalog against `server`, with the given
/// ffmpeg stand-in (or no remux tool at all)
pub async fn downloader_for(
    server: &MockServer,
    download_dir: &Path,
    ffmpeg: Option<PathBuf>,
) -> TrackDownloader {
    let mut config = config_for(server, download_dir);
    config.tools.search_path = false;
    config.tools.ffmpeg_path = ffmpeg;
    TrackDownloader::new(config)
        .await
        .expect("Failed to create downloader")
}

/// Path to a checked-in fake tool script
pub fn test_script(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_scripts")
        .join(name)
}
