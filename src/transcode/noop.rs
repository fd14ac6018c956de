//! No-op remuxer for hosts without ffmpeg

use super::{Remuxer, TranscodePlan};
use async_trait::async_trait;
use std::path::Path;

/// Remuxer used when no external binary is available or configured
///
/// Every call fails with [`Error::ToolMissing`](crate::Error::ToolMissing),
/// which makes the pipeline keep the original payload under its own
/// extension.
///
/// # Examples
///
/// ```
/// use track_dl::transcode::{decide, NoOpRemuxer, Remuxer};
/// use std::path::Path;
///
/// # #[tokio::main]
/// # async fn main() {
/// let remuxer = NoOpRemuxer;
/// let result = remuxer
///     .remux(Path::new("a.partial"), Path::new("b.partial"), &decide(".m4a"))
///     .await;
/// assert!(result.is_err());
/// # }
/// ```
pub struct NoOpRemuxer;

#[async_trait]
impl Remuxer for NoOpRemuxer {
    async fn remux(
        &self,
        _input: &Path,
        _output: &Path,
        _plan: &TranscodePlan,
    ) -> crate::Result<()> {
        Err(crate::Error::ToolMissing(
            "remuxing requires the ffmpeg binary. \
             Configure ffmpeg_path in config or ensure ffmpeg is in PATH."
                .into(),
        ))
    }

    fn is_available(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}
