//! CLI-based remuxer using the external ffmpeg binary

use super::{Remuxer, TranscodePlan};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Remuxer that runs `ffmpeg` with a stream-copy instruction
///
/// The invocation is equivalent to
/// `ffmpeg -hide_banner -loglevel error -nostdin -y -i <input> -c:a copy -f <format> <output>`.
///
/// # Examples
///
/// ```no_run
/// use track_dl::transcode::FfmpegRemuxer;
/// use std::path::PathBuf;
///
/// // Create with explicit path
/// let remuxer = FfmpegRemuxer::new(PathBuf::from("/usr/bin/ffmpeg"));
///
/// // Or auto-discover from PATH
/// let remuxer = FfmpegRemuxer::from_path().expect("ffmpeg not found in PATH");
/// ```
pub struct FfmpegRemuxer {
    binary_path: PathBuf,
}

impl FfmpegRemuxer {
    /// Create a new remuxer with an explicit binary path
    pub fn new(binary_path: PathBuf) -> Self {
        Self { binary_path }
    }

    /// Attempt to find ffmpeg in PATH
    ///
    /// Returns `None` if the binary is not found.
    pub fn from_path() -> Option<Self> {
        which::which("ffmpeg").ok().map(Self::new)
    }

    /// Path of the binary this remuxer runs
    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    fn command(&self, input: &Path, output: &Path, plan: &TranscodePlan) -> Command {
        let mut command = Command::new(&self.binary_path);
        command
            .args(["-hide_banner", "-loglevel", "error", "-nostdin", "-y", "-i"])
            .arg(input)
            .args(["-c:a", "copy"]);
        if let Some(format) = plan.container_format {
            command.args(["-f", format]);
        }
        command
            .arg(output)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }
}

#[async_trait]
impl Remuxer for FfmpegRemuxer {
    async fn remux(&self, input: &Path, output: &Path, plan: &TranscodePlan) -> crate::Result<()> {
        tracing::debug!(
            binary = ?self.binary_path,
            input = ?input,
            output = ?output,
            "running remux"
        );

        let result = self.command(input, output, plan).output().await.map_err(|e| {
            crate::Error::ToolMissing(format!(
                "failed to execute {}: {}",
                self.binary_path.display(),
                e
            ))
        })?;

        if result.status.success() {
            return Ok(());
        }

        Err(crate::Error::Transcode {
            input: input.to_path_buf(),
            exit_code: result.status.code(),
            stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
        })
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "ffmpeg"
    }
}
