//! Pipeline tests against local payload servers and fake tools.

mod batch;

use super::TrackDownloader;
use crate::catalog::CatalogClient;
use crate::config::Config;
use crate::error::CatalogError;
use crate::transcode::{FfmpegRemuxer, NoOpRemuxer, Remuxer};
use crate::types::{SearchResult, TrackDetail, TrackId, TrackSummary};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// In-memory catalog keyed by track id
#[derive(Default)]
pub(super) struct StubCatalog {
    details: HashMap<String, TrackDetail>,
}

impl StubCatalog {
    pub(super) fn with(mut self, id: &str, detail: TrackDetail) -> Self {
        self.details.insert(id.to_string(), detail);
        self
    }
}

#[async_trait]
impl CatalogClient for StubCatalog {
    async fn search(&self, _query: &str, _page: u32) -> crate::Result<SearchResult> {
        let mut tracks: Vec<TrackSummary> = self
            .details
            .iter()
            .map(|(id, detail)| TrackSummary::new(detail.title.clone(), id.as_str()))
            .collect();
        tracks.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(SearchResult {
            total_pages: 1,
            total_tracks: tracks.len() as u32,
            tracks,
        })
    }

    async fn fetch_detail(&self, track_id: &TrackId) -> crate::Result<TrackDetail> {
        self.details.get(track_id.as_str()).cloned().ok_or_else(|| {
            CatalogError::Parse {
                message: format!("provider did not report success for {track_id}"),
                raw: Some(r#"{"msg":0}"#.into()),
            }
            .into()
        })
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

pub(super) fn detail(title: &str, payload_url: String, lyric: Option<&str>) -> TrackDetail {
    TrackDetail {
        title: title.to_string(),
        payload_url,
        lyric_text: lyric.map(str::to_string),
    }
}

pub(super) fn test_script(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_scripts")
        .join(name)
}

pub(super) fn ffmpeg_ok() -> Arc<dyn Remuxer> {
    Arc::new(FfmpegRemuxer::new(test_script("fake_ffmpeg_ok.sh")))
}

pub(super) fn ffmpeg_fail() -> Arc<dyn Remuxer> {
    Arc::new(FfmpegRemuxer::new(test_script("fake_ffmpeg_fail.sh")))
}

pub(super) fn no_ffmpeg() -> Arc<dyn Remuxer> {
    Arc::new(NoOpRemuxer)
}

pub(super) async fn downloader_with(
    download_dir: &Path,
    catalog: StubCatalog,
    remuxer: Arc<dyn Remuxer>,
) -> TrackDownloader {
    let mut config = Config::default();
    config.download.download_dir = download_dir.to_path_buf();
    config.download.payload_timeout = Duration::from_secs(5);
    TrackDownloader::with_components(config, Arc::new(catalog), remuxer)
        .await
        .unwrap()
}

/// File names in `dir`, sorted
pub(super) fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Serve a response that promises more bytes than it sends, then hangs up
pub(super) async fn truncated_payload_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut request = [0u8; 2048];
            let _ = socket.read(&mut request).await;
            let _ = socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\nContent-Type: audio/mpeg\r\nContent-Length: 100000\r\n\r\nonly the first few bytes",
                )
                .await;
            let _ = socket.shutdown().await;
        }
    });
    format!("http://{addr}/cut.mp3")
}
