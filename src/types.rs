//! Core types for track-dl

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, ErrorKind};

/// Provider-assigned identifier of a track
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(pub String);

impl TrackId {
    /// Create a new TrackId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TrackId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of a catalog search
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSummary {
    /// Display title as listed by the provider
    pub title: String,
    /// Identifier used for the detail lookup
    pub id: TrackId,
}

impl TrackSummary {
    /// Create a summary from a title and identifier
    pub fn new(title: impl Into<String>, id: impl Into<TrackId>) -> Self {
        Self {
            title: title.into(),
            id: id.into(),
        }
    }
}

/// Playable detail of a single track
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackDetail {
    /// Track title, used to derive artifact file names
    pub title: String,
    /// Where the audio payload can be fetched from
    pub payload_url: String,
    /// Synchronized lyric text, if the provider has any
    pub lyric_text: Option<String>,
}

/// One page of catalog search results
///
/// `total_pages` and `total_tracks` are best-effort: zero means "unknown" when
/// `tracks` is non-empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Tracks on the requested page, in provider order
    pub tracks: Vec<TrackSummary>,
    /// Number of result pages reported by the provider
    pub total_pages: u32,
    /// Number of matching tracks reported by the provider
    pub total_tracks: u32,
}

impl SearchResult {
    /// Whether the page contains no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// Result of running the pipeline for one track
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineOutcome {
    /// Payload was fetched and committed at this path
    Committed(PathBuf),
    /// A finished artifact was already present; no network I/O was performed
    SkippedExisting(PathBuf),
    /// The track could not be committed
    Failed {
        /// Failure classification
        kind: ErrorKind,
        /// Diagnostic detail (provider response, tool stderr, ...)
        detail: String,
        /// Original payload kept under its own extension, if it was preserved
        preserved: Option<PathBuf>,
    },
}

impl PipelineOutcome {
    /// Build a failure outcome from an error
    pub fn failed(error: &Error) -> Self {
        PipelineOutcome::Failed {
            kind: error.kind(),
            detail: error.detail(),
            preserved: None,
        }
    }

    /// Whether the track ended up with a finished artifact at its final path
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            PipelineOutcome::Committed(_) | PipelineOutcome::SkippedExisting(_)
        )
    }

    /// Failure classification, if this is a failure
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            PipelineOutcome::Failed { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// The file this outcome left on disk, if any
    ///
    /// For the preserve-on-remux-failure branches this is the original payload.
    pub fn path(&self) -> Option<&Path> {
        match self {
            PipelineOutcome::Committed(path) | PipelineOutcome::SkippedExisting(path) => {
                Some(path)
            }
            PipelineOutcome::Failed { preserved, .. } => preserved.as_deref(),
        }
    }
}

/// Per-track entry of a [`BatchReport`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackReport {
    /// Requested track
    pub id: TrackId,
    /// Title as known when the track was requested
    pub title: String,
    /// What happened to it
    pub outcome: PipelineOutcome,
}

/// Aggregate result of one batch, delivered once when the batch finishes
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Number of tracks that were committed or already present
    pub succeeded: usize,
    /// Titles of tracks that failed, in request order
    pub failed_titles: Vec<String>,
    /// Every track in request order
    pub tracks: Vec<TrackReport>,
}

impl BatchReport {
    pub(crate) fn push(&mut self, report: TrackReport) {
        if report.outcome.is_success() {
            self.succeeded += 1;
        } else {
            self.failed_titles.push(report.title.clone());
        }
        self.tracks.push(report);
    }

    /// Number of tracks that failed
    pub fn failed(&self) -> usize {
        self.failed_titles.len()
    }
}
