//! Artifact paths and the on-disk store
//!
//! The existence of a file at its final path *is* the durable state: there is
//! no manifest. Every writer stages into a `.partial`-marked sibling and
//! renames into place, so a final path is either absent or complete.

use crate::error::Result;
use crate::transcode::{TranscodePlan, decide};
use crate::utils::{FALLBACK_EXTENSION, sanitize_title};
use std::path::{Path, PathBuf};

/// Suffix of files that are still being written
pub const PARTIAL_SUFFIX: &str = ".partial";

/// Extension of the lyric companion file
pub const LYRIC_EXTENSION: &str = ".lrc";

/// Every path one track may touch, derived from its sanitized title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// Sanitized title shared by all paths
    pub stem: String,
    /// Committed audio artifact (`<stem>.mp3` or `<stem>.aac`)
    pub final_audio_path: PathBuf,
    /// Lyric companion (`<stem>.lrc`)
    pub lyric_path: PathBuf,
    /// Download staging file (`<stem>.partial`)
    pub temp_path: PathBuf,
    /// Remux output staging file (`<stem>.remux.partial`)
    pub remux_path: PathBuf,
    /// Where the original payload is kept when remuxing is impossible
    /// (`<stem><original extension>`)
    pub preserved_path: PathBuf,
    /// Container decision for this payload
    pub plan: TranscodePlan,
}

/// Target directory for committed artifacts
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Create a store rooted at `dir` (created lazily by [`ensure_dir`](Self::ensure_dir))
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory this store writes into
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Compute the deterministic paths for a track
    ///
    /// `original_extension` is the payload's extension including the dot, as
    /// returned by [`original_extension`](crate::utils::original_extension).
    ///
    /// # Examples
    ///
    /// ```
    /// use track_dl::artifact::ArtifactStore;
    /// use std::path::Path;
    ///
    /// let store = ArtifactStore::new("/music");
    /// let paths = store.paths("A/B", ".m4a");
    ///
    /// assert_eq!(paths.final_audio_path, Path::new("/music/A_B.aac"));
    /// assert_eq!(paths.lyric_path, Path::new("/music/A_B.lrc"));
    /// assert_eq!(paths.preserved_path, Path::new("/music/A_B.m4a"));
    /// ```
    pub fn paths(&self, title: &str, original_extension: &str) -> ArtifactPaths {
        let stem = sanitize_title(title);
        let plan = decide(original_extension);

        // A payload that itself ends in the staging suffix must not be
        // preserved under the staging name
        let preserved_extension = if original_extension.eq_ignore_ascii_case(PARTIAL_SUFFIX) {
            FALLBACK_EXTENSION
        } else {
            original_extension
        };

        let file = |suffix: &str| self.dir.join(format!("{stem}{suffix}"));
        ArtifactPaths {
            final_audio_path: file(plan.final_extension),
            lyric_path: file(LYRIC_EXTENSION),
            temp_path: file(PARTIAL_SUFFIX),
            remux_path: file(&format!(".remux{PARTIAL_SUFFIX}")),
            preserved_path: file(preserved_extension),
            plan,
            stem,
        }
    }

    /// Whether a finished artifact exists at `path`
    ///
    /// Errors while checking (e.g. an untraversable directory) count as
    /// absent, so the pipeline falls through to a fresh download that will
    /// surface the real error.
    pub async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    /// Create the target directory if it does not exist
    pub async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            crate::Error::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to create download directory '{}': {}",
                    self.dir.display(),
                    e
                ),
            ))
        })
    }

    /// Write the lyric companion unless one already exists
    ///
    /// Returns `Ok(true)` if a file was written, `Ok(false)` if an existing
    /// companion was left untouched.
    pub async fn write_lyric(&self, paths: &ArtifactPaths, text: &str) -> Result<bool> {
        if self.exists(&paths.lyric_path).await {
            return Ok(false);
        }

        let staging = self
            .dir
            .join(format!("{}{LYRIC_EXTENSION}{PARTIAL_SUFFIX}", paths.stem));
        if let Err(e) = tokio::fs::write(&staging, text).await {
            tokio::fs::remove_file(&staging).await.ok();
            return Err(e.into());
        }
        if let Err(e) = tokio::fs::rename(&staging, &paths.lyric_path).await {
            tokio::fs::remove_file(&staging).await.ok();
            return Err(e.into());
        }
        Ok(true)
    }
}
