//! Track downloader facade and pipeline, split into focused submodules.
//!
//! - [`orchestrator`] - Single-track state machine (fetch, stage, remux, commit)
//! - [`fetch`] - Chunked payload streaming
//! - [`batch`] - Background batch worker and its handle
//! - [`locks`] - Per-stem write exclusion

mod batch;
mod fetch;
mod locks;
mod orchestrator;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

pub use batch::BatchHandle;

use crate::catalog::{CatalogClient, HttpCatalogClient};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::transcode::{FfmpegRemuxer, NoOpRemuxer, Remuxer};
use crate::types::{SearchResult, TrackDetail, TrackId};
use locks::PathLocks;
use std::path::Path;
use std::sync::Arc;

/// Main downloader instance (cloneable - all fields are Arc-wrapped)
#[derive(Clone)]
pub struct TrackDownloader {
    /// Configuration (wrapped in Arc for sharing across tasks)
    pub(crate) config: Arc<Config>,
    /// Catalog used to search and resolve tracks
    pub(crate) catalog: Arc<dyn CatalogClient>,
    /// Container remuxer (ffmpeg, or a no-op when unavailable)
    pub(crate) remuxer: Arc<dyn Remuxer>,
    /// Client for payload transfers; carries no catalog headers
    pub(crate) http: reqwest::Client,
    /// Serializes writers that share an artifact stem
    pub(crate) locks: PathLocks,
}

impl TrackDownloader {
    /// Create a downloader with the default HTTP catalog and discovered ffmpeg
    ///
    /// Validates `config`, creates the download directory and picks a
    /// remuxer: the configured `tools.ffmpeg_path`, else `ffmpeg` found on
    /// `PATH` (when `tools.search_path` is set), else a no-op that preserves
    /// originals.
    pub async fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let catalog = Arc::new(HttpCatalogClient::new(config.catalog.clone())?);

        let remuxer: Arc<dyn Remuxer> = if let Some(ref ffmpeg_path) = config.tools.ffmpeg_path {
            Arc::new(FfmpegRemuxer::new(ffmpeg_path.clone()))
        } else if config.tools.search_path {
            FfmpegRemuxer::from_path()
                .map(|r| Arc::new(r) as Arc<dyn Remuxer>)
                .unwrap_or_else(|| Arc::new(NoOpRemuxer))
        } else {
            Arc::new(NoOpRemuxer)
        };

        Self::with_components(config, catalog, remuxer).await
    }

    /// Create a downloader from explicit catalog and remuxer implementations
    pub async fn with_components(
        config: Config,
        catalog: Arc<dyn CatalogClient>,
        remuxer: Arc<dyn Remuxer>,
    ) -> Result<Self> {
        tokio::fs::create_dir_all(&config.download.download_dir)
            .await
            .map_err(|e| {
                Error::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create download directory '{}': {}",
                        config.download.download_dir.display(),
                        e
                    ),
                ))
            })?;

        let http = reqwest::Client::builder().build()?;

        tracing::info!(
            catalog = catalog.name(),
            remuxer = remuxer.name(),
            remux_available = remuxer.is_available(),
            download_dir = %config.download.download_dir.display(),
            "Track downloader initialized"
        );
        if !remuxer.is_available() {
            tracing::warn!("ffmpeg not available; non-mp3 payloads will be kept in their original container");
        }

        Ok(Self {
            config: Arc::new(config),
            catalog,
            remuxer,
            http,
            locks: PathLocks::default(),
        })
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Directory batches write into
    pub fn download_dir(&self) -> &Path {
        &self.config.download.download_dir
    }

    /// Whether non-mp3 payloads can be remuxed to AAC
    pub fn remux_available(&self) -> bool {
        self.remuxer.is_available()
    }

    /// Search the catalog; see [`CatalogClient::search`]
    pub async fn search(&self, query: &str, page: u32) -> Result<SearchResult> {
        self.catalog.search(query, page).await
    }

    /// Resolve a track; see [`CatalogClient::fetch_detail`]
    pub async fn fetch_track(&self, track_id: &TrackId) -> Result<TrackDetail> {
        self.catalog.fetch_detail(track_id).await
    }
}
