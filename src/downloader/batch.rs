//! Background batch execution

use super::TrackDownloader;
use crate::error::{Error, Result};
use crate::types::{BatchReport, TrackSummary};
use std::path::{Path, PathBuf};
use tokio::task::JoinHandle;

/// Handle to a batch running in the background
///
/// The batch keeps running if the handle is dropped; its report is then lost.
#[derive(Debug)]
pub struct BatchHandle {
    handle: JoinHandle<BatchReport>,
    len: usize,
}

impl BatchHandle {
    /// Number of tracks in the batch
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the batch was submitted without tracks
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the batch has finished
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the batch to finish and take its report
    ///
    /// # Errors
    ///
    /// Returns [`Error::Other`] only if the worker task itself panicked or was
    /// aborted; per-track failures are part of the report.
    pub async fn join(self) -> Result<BatchReport> {
        self.handle
            .await
            .map_err(|e| Error::Other(format!("batch worker did not complete: {e}")))
    }
}

impl TrackDownloader {
    /// Download one track in the background
    pub fn download_one(&self, track: TrackSummary) -> BatchHandle {
        self.download_batch(vec![track])
    }

    /// Download `tracks` into the configured download directory
    ///
    /// Returns immediately. Tracks are processed one after another on a
    /// background task, in order; a failing track never stops the batch.
    pub fn download_batch(&self, tracks: Vec<TrackSummary>) -> BatchHandle {
        let target_dir = self.config.download.download_dir.clone();
        self.download_batch_to(tracks, target_dir)
    }

    /// Like [`download_batch`](Self::download_batch) with an explicit target directory
    pub fn download_batch_to(&self, tracks: Vec<TrackSummary>, target_dir: PathBuf) -> BatchHandle {
        let len = tracks.len();
        let downloader = self.clone();
        let handle = tokio::spawn(async move { downloader.run_batch(tracks, &target_dir).await });
        BatchHandle { handle, len }
    }

    pub(crate) async fn run_batch(&self, tracks: Vec<TrackSummary>, target_dir: &Path) -> BatchReport {
        tracing::info!(
            tracks = tracks.len(),
            target_dir = %target_dir.display(),
            "batch started"
        );

        let mut report = BatchReport::default();
        for track in &tracks {
            report.push(self.process_track(track, target_dir).await);
        }

        tracing::info!(
            succeeded = report.succeeded,
            failed = report.failed(),
            "batch finished"
        );
        report
    }
}
