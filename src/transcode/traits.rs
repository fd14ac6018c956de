//! Remux capability trait

use super::TranscodePlan;
use async_trait::async_trait;
use std::path::Path;

/// Trait for the external container remux step
///
/// Implementations read a fully staged payload and write the remuxed stream
/// to `output`, overwriting anything already there. Callers are responsible
/// for moving `output` into its final place.
///
/// # Examples
///
/// ```no_run
/// use track_dl::transcode::{decide, FfmpegRemuxer, Remuxer};
/// use std::path::Path;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let remuxer = FfmpegRemuxer::from_path().expect("ffmpeg not found");
/// remuxer
///     .remux(Path::new("in.partial"), Path::new("out.partial"), &decide(".m4a"))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait Remuxer: Send + Sync {
    /// Stream-copy the audio of `input` into `output`
    ///
    /// # Errors
    ///
    /// - [`Error::ToolMissing`](crate::Error::ToolMissing) if the tool cannot be found or started
    /// - [`Error::Transcode`](crate::Error::Transcode) if the tool ran and exited non-zero
    async fn remux(&self, input: &Path, output: &Path, plan: &TranscodePlan) -> crate::Result<()>;

    /// Whether this implementation can remux at all
    fn is_available(&self) -> bool;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
