//! Playlist persistence and library scanning
//!
//! Playlists are stored as extended M3U: a `#EXTM3U` header followed by one
//! `#EXTINF:-1,<title>` line and one path line per entry.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Audio file extensions picked up by [`scan_directory`] (lowercase, no dot)
pub const SUPPORTED_EXTENSIONS: &[&str] = &["mp3", "flac", "wav", "aac", "ogg", "m4a"];

const M3U_HEADER: &str = "#EXTM3U";
const EXTINF_PREFIX: &str = "#EXTINF:";

/// One playable file in a playlist
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    /// Display title
    pub title: String,
    /// Location of the audio file
    pub path: PathBuf,
}

impl PlaylistEntry {
    /// Entry for `path`, titled by its file stem
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { title, path }
    }
}

/// Trait for playlist storage backends
#[async_trait]
pub trait PlaylistStore: Send + Sync {
    /// Replace the stored playlist with `entries`
    async fn save(&self, entries: &[PlaylistEntry]) -> Result<()>;

    /// Load the stored playlist
    ///
    /// Entries whose file no longer exists are dropped. A missing playlist
    /// loads as empty.
    async fn load(&self) -> Result<Vec<PlaylistEntry>>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}

/// Playlist stored as an extended M3U file
#[derive(Debug, Clone)]
pub struct M3uPlaylistStore {
    path: PathBuf,
}

impl M3uPlaylistStore {
    /// Store backed by the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the playlist file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PlaylistStore for M3uPlaylistStore {
    async fn save(&self, entries: &[PlaylistEntry]) -> Result<()> {
        let mut contents = String::from(M3U_HEADER);
        contents.push('\n');
        for entry in entries {
            // Titles are single-line in M3U
            let title = entry.title.replace(['\r', '\n'], " ");
            contents.push_str(&format!("{EXTINF_PREFIX}-1,{title}\n"));
            contents.push_str(&format!("{}\n", entry.path.display()));
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, contents).await?;

        tracing::info!(
            path = %self.path.display(),
            entries = entries.len(),
            "playlist saved"
        );
        Ok(())
    }

    async fn load(&self) -> Result<Vec<PlaylistEntry>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no playlist file yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        let mut pending_title: Option<String> = None;
        for line in contents.lines().map(str::trim) {
            if line.is_empty() || line == M3U_HEADER {
                continue;
            }
            if let Some(info) = line.strip_prefix(EXTINF_PREFIX) {
                pending_title = info.split_once(',').map(|(_, title)| title.trim().to_string());
                continue;
            }
            if line.starts_with('#') {
                continue;
            }

            let path = PathBuf::from(line);
            let title = pending_title.take();
            if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
                tracing::warn!(path = %path.display(), "dropping missing playlist entry");
                continue;
            }
            entries.push(match title {
                Some(title) => PlaylistEntry { title, path },
                None => PlaylistEntry::from_path(path),
            });
        }

        tracing::debug!(path = %self.path.display(), entries = entries.len(), "playlist loaded");
        Ok(entries)
    }

    fn name(&self) -> &'static str {
        "m3u"
    }
}

/// Find every supported audio file under `dir`
///
/// Entries are returned depth-first, sorted by file name within each
/// directory. The extension match is case-insensitive. Unreadable subdirectories are
/// skipped with a warning.
pub fn scan_directory(dir: &Path) -> Vec<PlaylistEntry> {
    WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry while scanning");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| is_supported_audio(path))
        .map(PlaylistEntry::from_path)
        .collect()
}

fn is_supported_audio(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}
