//! Configuration types for track-dl

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{path::Path, path::PathBuf, time::Duration};

/// Catalog provider endpoints, identifying headers and request timeouts
///
/// Used as a nested sub-config within [`Config`]. Injected into
/// [`HttpCatalogClient`](crate::catalog::HttpCatalogClient) at construction so
/// tests can point it at a fake endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Provider base URL without trailing slash (default: "https://www.dda5.com")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the search page, appended to `base_url` (default: "/so.php")
    #[serde(default = "default_search_path")]
    pub search_path: String,

    /// Path of the detail endpoint, appended to `base_url` (default: "/style/js/play.php")
    #[serde(default = "default_detail_path")]
    pub detail_path: String,

    /// Category discriminator sent with every detail lookup (default: "dance")
    #[serde(default = "default_category")]
    pub category: String,

    /// User-Agent header sent with every catalog request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Timeout for a search request (default: 15 seconds)
    #[serde(default = "default_search_timeout", with = "duration_serde")]
    pub search_timeout: Duration,

    /// Timeout for a detail lookup (default: 10 seconds)
    #[serde(default = "default_detail_timeout", with = "duration_serde")]
    pub detail_timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            search_path: default_search_path(),
            detail_path: default_detail_path(),
            category: default_category(),
            user_agent: default_user_agent(),
            search_timeout: default_search_timeout(),
            detail_timeout: default_detail_timeout(),
        }
    }
}

impl CatalogConfig {
    /// Full URL of the search page
    pub fn search_url(&self) -> String {
        format!("{}{}", self.base_url, self.search_path)
    }

    /// Full URL of the detail endpoint
    pub fn detail_url(&self) -> String {
        format!("{}{}", self.base_url, self.detail_path)
    }

    /// Referer header value (the provider's root page)
    pub fn referer(&self) -> String {
        format!("{}/", self.base_url)
    }
}

/// Download behavior configuration (target directory, payload timeout)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Directory that receives committed audio and lyric files (default: "./downloads")
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,

    /// Timeout for a whole payload transfer (default: 60 seconds)
    #[serde(default = "default_payload_timeout", with = "duration_serde")]
    pub payload_timeout: Duration,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            download_dir: default_download_dir(),
            payload_timeout: default_payload_timeout(),
        }
    }
}

/// External remux tool location
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Path to ffmpeg executable (auto-detected if None)
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,

    /// Whether to search PATH for ffmpeg if no explicit path is set (default: true)
    #[serde(default = "default_true")]
    pub search_path: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: None,
            search_path: true,
        }
    }
}

/// Main configuration for [`TrackDownloader`](crate::TrackDownloader)
///
/// - [`catalog`](CatalogConfig): provider endpoints, headers, timeouts
/// - [`download`](DownloadConfig): artifact directory and payload timeout
/// - [`tools`](ToolsConfig): remux binary discovery
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Catalog provider settings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Download behavior settings
    #[serde(default)]
    pub download: DownloadConfig,

    /// External tool settings
    #[serde(default)]
    pub tools: ToolsConfig,
}

impl Config {
    /// Load configuration from a JSON file, filling absent fields with defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("failed to read {}: {}", path.display(), e),
            key: None,
        })?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Download directory
    pub fn download_dir(&self) -> &PathBuf {
        &self.download.download_dir
    }

    /// Check settings that would otherwise only fail at request time
    pub fn validate(&self) -> Result<()> {
        let base = url::Url::parse(&self.catalog.base_url).map_err(|e| Error::Config {
            message: format!("invalid base URL '{}': {}", self.catalog.base_url, e),
            key: Some("catalog.base_url".into()),
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(Error::Config {
                message: format!("unsupported URL scheme '{}'", base.scheme()),
                key: Some("catalog.base_url".into()),
            });
        }
        if self.catalog.base_url.ends_with('/') {
            return Err(Error::Config {
                message: "base URL must not end with '/'".into(),
                key: Some("catalog.base_url".into()),
            });
        }

        for (key, value) in [
            ("catalog.search_path", &self.catalog.search_path),
            ("catalog.detail_path", &self.catalog.detail_path),
        ] {
            if !value.starts_with('/') {
                return Err(Error::Config {
                    message: format!("path '{value}' must start with '/'"),
                    key: Some(key.into()),
                });
            }
        }

        if self.catalog.category.trim().is_empty() {
            return Err(Error::Config {
                message: "category must not be empty".into(),
                key: Some("catalog.category".into()),
            });
        }

        for (key, timeout) in [
            ("catalog.search_timeout", self.catalog.search_timeout),
            ("catalog.detail_timeout", self.catalog.detail_timeout),
            ("download.payload_timeout", self.download.payload_timeout),
        ] {
            if timeout.is_zero() {
                return Err(Error::Config {
                    message: "timeout must be greater than zero".into(),
                    key: Some(key.into()),
                });
            }
        }

        Ok(())
    }
}

fn default_base_url() -> String {
    "https://www.dda5.com".into()
}

fn default_search_path() -> String {
    "/so.php".into()
}

fn default_detail_path() -> String {
    "/style/js/play.php".into()
}

fn default_category() -> String {
    "dance".into()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
        .into()
}

fn default_search_timeout() -> Duration {
    Duration::from_secs(15)
}

fn default_detail_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_payload_timeout() -> Duration {
    Duration::from_secs(60)
}

fn default_download_dir() -> PathBuf {
    PathBuf::from("./downloads")
}

fn default_true() -> bool {
    true
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
