//! Container normalization
//!
//! The provider serves exactly two payload shapes in practice: standard MP3
//! files, which are committed as-is, and everything else, which is remuxed
//! into an ADTS `.aac` container by stream copy (no re-encode, bit-identical
//! audio).
//!
//! ## Architecture
//!
//! [`decide`] is a pure function from the payload's original extension to a
//! [`TranscodePlan`]. The remux step itself sits behind the [`Remuxer`] trait:
//!
//! - [`FfmpegRemuxer`]: runs the external `ffmpeg` binary
//! - [`NoOpRemuxer`]: stand-in when no binary is available; always reports
//!   [`Error::ToolMissing`](crate::Error::ToolMissing)
//!
//! ## Usage
//!
//! ```no_run
//! use track_dl::transcode::{decide, FfmpegRemuxer, Remuxer};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let plan = decide(".m4a");
//!     if plan.requires_remux {
//!         let remuxer = FfmpegRemuxer::from_path().expect("ffmpeg not found");
//!         remuxer
//!             .remux(Path::new("song.partial"), Path::new("song.remux.partial"), &plan)
//!             .await?;
//!     }
//!     Ok(())
//! }
//! ```

mod cli;
mod noop;
mod traits;

pub use cli::FfmpegRemuxer;
pub use noop::NoOpRemuxer;
pub use traits::Remuxer;

/// Extension of payloads that are committed without remuxing
pub const DIRECT_EXTENSION: &str = ".mp3";

/// Extension of remuxed payloads
pub const REMUX_EXTENSION: &str = ".aac";

/// Muxer name for [`REMUX_EXTENSION`], passed explicitly because the remux
/// output is written to a staging file whose extension says nothing
pub const REMUX_FORMAT: &str = "adts";

/// Decision for one payload: where it ends up and whether it must be remuxed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscodePlan {
    /// Extension of the committed artifact, including the dot
    pub final_extension: &'static str,
    /// Whether the payload must pass through the remux tool
    pub requires_remux: bool,
    /// Container format the remux tool must write (None for direct commits)
    pub container_format: Option<&'static str>,
}

/// Decide the canonical container for a payload's original extension
///
/// `.mp3` (any case) is committed directly; anything else, including an
/// empty or unknown extension, is remuxed to `.aac`.
///
/// ```
/// use track_dl::transcode::decide;
///
/// assert!(!decide(".mp3").requires_remux);
/// assert_eq!(decide(".m4a").final_extension, ".aac");
/// assert!(decide("").requires_remux);
/// ```
#[must_use]
pub fn decide(original_extension: &str) -> TranscodePlan {
    if original_extension.eq_ignore_ascii_case(DIRECT_EXTENSION) {
        TranscodePlan {
            final_extension: DIRECT_EXTENSION,
            requires_remux: false,
            container_format: None,
        }
    } else {
        TranscodePlan {
            final_extension: REMUX_EXTENSION,
            requires_remux: true,
            container_format: Some(REMUX_FORMAT),
        }
    }
}
