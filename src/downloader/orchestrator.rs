//! Single-track pipeline: fetch, stage, remux and commit.
//!
//! States and their cleanup obligations:
//!
//! | State     | On disk                         | On failure                         |
//! |-----------|---------------------------------|------------------------------------|
//! | Fetching  | `<stem>.partial` (growing)      | remove temp                        |
//! | Staged    | complete `<stem>.partial`       | remove temp                        |
//! | Remuxing  | temp + `<stem>.remux.partial`   | remove remux output, keep original |
//! | Committed | final artifact                  |                                    |
//!
//! Only a rename ever places a file at its final path.

use super::TrackDownloader;
use super::fetch::stream_to_file;
use crate::artifact::{ArtifactPaths, ArtifactStore};
use crate::error::{Error, ErrorKind};
use crate::types::{PipelineOutcome, TrackDetail, TrackReport, TrackSummary};
use crate::utils::original_extension;
use std::path::Path;

impl TrackDownloader {
    /// Turn a resolved track into a committed artifact in `target_dir`
    ///
    /// Idempotent: if the final artifact already exists nothing is fetched and
    /// [`PipelineOutcome::SkippedExisting`] is returned. Otherwise the payload
    /// is streamed into a `.partial` staging file and either renamed into place
    /// (mp3) or remuxed to AAC. When remuxing is impossible the original
    /// payload is kept under its own extension and the outcome is a failure
    /// naming that file.
    ///
    /// A lyric companion is written next to any artifact this leaves on disk,
    /// unless one already exists. Lyric failures are logged, never returned.
    ///
    /// This never returns an error: every failure is folded into
    /// [`PipelineOutcome::Failed`].
    pub async fn materialize(&self, detail: &TrackDetail, target_dir: &Path) -> PipelineOutcome {
        let store = ArtifactStore::new(target_dir);
        let paths = store.paths(&detail.title, &original_extension(&detail.payload_url));

        let _guard = self.locks.acquire(&paths.temp_path).await;

        let outcome = self.produce_audio(&store, detail, &paths).await;
        if outcome.path().is_some() {
            write_lyric(&store, detail, &paths).await;
        }

        match &outcome {
            PipelineOutcome::Committed(path) => {
                tracing::info!(title = %detail.title, path = %path.display(), "track committed")
            }
            PipelineOutcome::SkippedExisting(path) => {
                tracing::info!(title = %detail.title, path = %path.display(), "artifact already present, skipped")
            }
            PipelineOutcome::Failed {
                kind,
                detail: reason,
                preserved,
            } => tracing::warn!(
                title = %detail.title,
                kind = %kind,
                reason = %reason,
                preserved = ?preserved,
                "track failed"
            ),
        }
        outcome
    }

    /// Resolve `track` through the catalog and materialize it in `target_dir`
    pub async fn process_track(&self, track: &TrackSummary, target_dir: &Path) -> TrackReport {
        let outcome = match self.catalog.fetch_detail(&track.id).await {
            Ok(detail) => self.materialize(&detail, target_dir).await,
            Err(e) => {
                tracing::warn!(track_id = %track.id, title = %track.title, error = %e, "could not resolve track");
                PipelineOutcome::failed(&e)
            }
        };

        TrackReport {
            id: track.id.clone(),
            title: track.title.clone(),
            outcome,
        }
    }

    async fn produce_audio(
        &self,
        store: &ArtifactStore,
        detail: &TrackDetail,
        paths: &ArtifactPaths,
    ) -> PipelineOutcome {
        if store.exists(&paths.final_audio_path).await {
            return PipelineOutcome::SkippedExisting(paths.final_audio_path.clone());
        }

        if let Err(e) = store.ensure_dir().await {
            return PipelineOutcome::failed(&e);
        }

        // Fetching
        tracing::debug!(
            url = %detail.payload_url,
            temp = %paths.temp_path.display(),
            "fetching payload"
        );
        let fetched = stream_to_file(
            &self.http,
            &detail.payload_url,
            &paths.temp_path,
            self.config.download.payload_timeout,
        )
        .await;
        match fetched {
            Ok(bytes) => tracing::debug!(bytes, temp = %paths.temp_path.display(), "payload staged"),
            Err(e) => {
                discard(&paths.temp_path).await;
                return PipelineOutcome::failed(&e);
            }
        }

        // Staged
        if paths.plan.requires_remux {
            self.commit_remuxed(paths).await
        } else {
            commit_direct(paths).await
        }
    }

    async fn commit_remuxed(&self, paths: &ArtifactPaths) -> PipelineOutcome {
        tracing::debug!(
            remuxer = self.remuxer.name(),
            input = %paths.temp_path.display(),
            "remuxing payload"
        );

        if let Err(e) = self
            .remuxer
            .remux(&paths.temp_path, &paths.remux_path, &paths.plan)
            .await
        {
            discard(&paths.remux_path).await;
            return preserve_original(paths, &e).await;
        }

        match tokio::fs::rename(&paths.remux_path, &paths.final_audio_path).await {
            Ok(()) => {
                discard(&paths.temp_path).await;
                PipelineOutcome::Committed(paths.final_audio_path.clone())
            }
            Err(e) => {
                discard(&paths.remux_path).await;
                discard(&paths.temp_path).await;
                PipelineOutcome::failed(&Error::Io(e))
            }
        }
    }
}

async fn commit_direct(paths: &ArtifactPaths) -> PipelineOutcome {
    match tokio::fs::rename(&paths.temp_path, &paths.final_audio_path).await {
        Ok(()) => PipelineOutcome::Committed(paths.final_audio_path.clone()),
        Err(e) => {
            discard(&paths.temp_path).await;
            PipelineOutcome::failed(&Error::Io(e))
        }
    }
}

/// Keep the staged payload under its original extension after a remux failure
async fn preserve_original(paths: &ArtifactPaths, cause: &Error) -> PipelineOutcome {
    match tokio::fs::rename(&paths.temp_path, &paths.preserved_path).await {
        Ok(()) => PipelineOutcome::Failed {
            kind: cause.kind(),
            detail: cause.detail(),
            preserved: Some(paths.preserved_path.clone()),
        },
        Err(e) => {
            discard(&paths.temp_path).await;
            PipelineOutcome::Failed {
                kind: ErrorKind::Filesystem,
                detail: format!("{}; original could not be kept: {e}", cause.detail()),
                preserved: None,
            }
        }
    }
}

async fn write_lyric(store: &ArtifactStore, detail: &TrackDetail, paths: &ArtifactPaths) {
    let Some(text) = detail.lyric_text.as_deref() else {
        return;
    };
    match store.write_lyric(paths, text).await {
        Ok(true) => tracing::debug!(path = %paths.lyric_path.display(), "lyric written"),
        Ok(false) => {}
        Err(e) => tracing::warn!(
            path = %paths.lyric_path.display(),
            error = %e,
            "failed to write lyric"
        ),
    }
}

/// Remove a staging file, ignoring a file that is already gone
async fn discard(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => tracing::debug!(path = %path.display(), "removed staging file"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to remove staging file"),
    }
}
