//! Utility functions for file naming and URL inspection

use std::path::Path;

/// Characters that are unsafe in file names on at least one supported platform
pub const UNSAFE_FILENAME_CHARS: [char; 9] = ['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Extension used when a payload URL carries no extension at all
pub const FALLBACK_EXTENSION: &str = ".tmp";

/// Replace every filesystem-unsafe character in `title` with `_`
///
/// All other characters, and their order, are preserved. The mapping is not
/// injective: titles that differ only in unsafe characters (or in `_` at the
/// same position) share a stem.
///
/// # Examples
///
/// ```
/// use track_dl::utils::sanitize_title;
///
/// assert_eq!(sanitize_title("AC/DC: Back in Black?"), "AC_DC_ Back in Black_");
/// assert_eq!(sanitize_title("阿姐鼓"), "阿姐鼓");
/// ```
#[must_use]
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if UNSAFE_FILENAME_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// Lower-cased extension (including the dot) of a payload URL's path
///
/// Query string and fragment are ignored. Returns [`FALLBACK_EXTENSION`] when
/// the last path segment has no extension or the URL cannot be parsed.
///
/// # Examples
///
/// ```
/// use track_dl::utils::original_extension;
///
/// assert_eq!(original_extension("https://cdn.example/a/Song.MP3?sig=1"), ".mp3");
/// assert_eq!(original_extension("https://cdn.example/a/stream"), ".tmp");
/// ```
#[must_use]
pub fn original_extension(payload_url: &str) -> String {
    let Ok(parsed) = url::Url::parse(payload_url) else {
        return FALLBACK_EXTENSION.to_string();
    };

    let last_segment = parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default();

    match Path::new(last_segment).extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.is_empty() => format!(".{}", ext.to_lowercase()),
        _ => FALLBACK_EXTENSION.to_string(),
    }
}
