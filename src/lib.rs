//! # track-dl
//!
//! Library for searching a remote music catalog and turning its tracks into
//! durable local audio files.
//!
//! ## Design Philosophy
//!
//! track-dl is designed to be:
//! - **Idempotent** - A finished file on disk is the only state; re-running a batch skips it
//! - **Crash-safe** - Files only appear at their final name once complete
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Pluggable** - Catalog, remux tool and playlist storage sit behind traits
//!
//! ## Quick Start
//!
//! ```no_run
//! use track_dl::{Config, TrackDownloader};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let downloader = TrackDownloader::new(Config::default()).await?;
//!
//!     if !downloader.remux_available() {
//!         eprintln!("ffmpeg not found; non-mp3 tracks keep their original container");
//!     }
//!
//!     let page = downloader.search("阿姐鼓", 1).await?;
//!     println!("{} tracks on {} pages", page.total_tracks, page.total_pages);
//!
//!     let report = downloader.download_batch(page.tracks).join().await?;
//!     println!("{} done, failed: {:?}", report.succeeded, report.failed_titles);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Artifact naming and on-disk commit
pub mod artifact;
/// Remote catalog access
pub mod catalog;
/// Configuration types
pub mod config;
/// Track downloader facade and pipeline
pub mod downloader;
/// Error types
pub mod error;
/// M3U playlists and library scanning
pub mod playlist;
/// Container decision and remuxing
pub mod transcode;
/// Core types
pub mod types;
/// Utility functions
pub mod utils;

// Re-export commonly used types
pub use artifact::{ArtifactPaths, ArtifactStore};
pub use catalog::{CatalogClient, HttpCatalogClient};
pub use config::{CatalogConfig, Config, DownloadConfig, ToolsConfig};
pub use downloader::{BatchHandle, TrackDownloader};
pub use error::{CatalogError, Error, ErrorKind, Result};
pub use playlist::{M3uPlaylistStore, PlaylistEntry, PlaylistStore, scan_directory};
pub use transcode::{FfmpegRemuxer, NoOpRemuxer, Remuxer, TranscodePlan};
pub use types::{
    BatchReport, PipelineOutcome, SearchResult, TrackDetail, TrackId, TrackReport, TrackSummary,
};
