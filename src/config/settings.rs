//! Configuration settings
//!
//! Provides configuration loading from a TOML file and environment
//! variables. Everything that was an ambient constant in earlier versions
//! (portal base URL, default cookie path, output root, downloader binaries)
//! lives here and is passed explicitly into the session manager and the CLI.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// Helper functions for serde defaults
fn default_base_url() -> String {
    "https://online.udvash-unmesh.com".to_string()
}

fn default_cookie_path() -> PathBuf {
    PathBuf::from("./cookie.txt")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./UdvashDL")
}

fn default_lectures_subdir() -> String {
    "Lectures".to_string()
}

fn default_questions_subdir() -> String {
    "Questions".to_string()
}

fn default_video_downloader() -> String {
    "yt-dlp".to_string()
}

fn default_file_downloader() -> String {
    "wget".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_request_timeout() -> u64 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration settings for the downloader
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Portal endpoints and cookie store location
    #[serde(default)]
    pub portal: PortalSettings,
    /// Network configuration
    #[serde(default)]
    pub network: NetworkSettings,
    /// Download dispatch configuration
    #[serde(default)]
    pub download: DownloadSettings,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Portal endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalSettings {
    /// Base URL of the portal, without a trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Where the persisted cookie store lives
    #[serde(default = "default_cookie_path")]
    pub cookie_path: PathBuf,
}

/// Network configuration for the blocking HTTP transport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSettings {
    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

/// Download dispatch configuration
///
/// The downloader binaries are opaque collaborators; this crate only hands
/// them a URL and a destination path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadSettings {
    /// Root directory for downloaded content
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Subdirectory for lecture videos and notes
    #[serde(default = "default_lectures_subdir")]
    pub lectures_subdir: String,
    /// Subdirectory for exam question papers
    #[serde(default = "default_questions_subdir")]
    pub questions_subdir: String,
    /// Video-platform-aware downloader binary
    #[serde(default = "default_video_downloader")]
    pub video_downloader: String,
    /// Generic HTTP file downloader binary
    #[serde(default = "default_file_downloader")]
    pub file_downloader: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable verbose logging
    #[serde(default)]
    pub verbose: bool,
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            cookie_path: default_cookie_path(),
        }
    }
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            connect_timeout: default_connect_timeout(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            lectures_subdir: default_lectures_subdir(),
            questions_subdir: default_questions_subdir(),
            video_downloader: default_video_downloader(),
            file_downloader: default_file_downloader(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            verbose: false,
        }
    }
}

impl Settings {
    /// Create new settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings from environment variables only
    pub fn from_env() -> crate::Result<Self> {
        Self::default().merge_with_env()
    }

    /// Apply environment variable overrides on top of the current values
    pub fn merge_with_env(mut self) -> crate::Result<Self> {
        if let Ok(base_url) = std::env::var("UDVASH_BASE_URL") {
            self.portal.base_url = base_url;
        }

        if let Ok(cookie_path) = std::env::var("UDVASH_COOKIE_PATH") {
            self.portal.cookie_path = PathBuf::from(cookie_path);
        }

        if let Ok(output_dir) = std::env::var("UDVASH_OUTPUT_DIR") {
            self.download.output_dir = PathBuf::from(output_dir);
        }

        if let Ok(timeout) = std::env::var("UDVASH_REQUEST_TIMEOUT") {
            self.network.request_timeout = timeout.parse().map_err(|e| {
                crate::Error::config(
                    "UDVASH_REQUEST_TIMEOUT",
                    &format!("Invalid timeout: {}", e),
                )
            })?;
        }

        if let Ok(timeout) = std::env::var("UDVASH_CONNECT_TIMEOUT") {
            self.network.connect_timeout = timeout.parse().map_err(|e| {
                crate::Error::config(
                    "UDVASH_CONNECT_TIMEOUT",
                    &format!("Invalid timeout: {}", e),
                )
            })?;
        }

        if let Ok(level) = std::env::var("LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(verbose) = std::env::var("VERBOSE") {
            self.logging.verbose = verbose.parse().unwrap_or(false);
        }

        Ok(self)
    }

    /// Validate the final configuration
    pub fn validate(&self) -> crate::Result<()> {
        let base = url::Url::parse(&self.portal.base_url)?;
        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(crate::Error::config(
                "base_url",
                &format!("unsupported scheme: {}", base.scheme()),
            ));
        }

        if self.download.video_downloader.trim().is_empty() {
            return Err(crate::Error::config(
                "video_downloader",
                "downloader binary name must not be empty",
            ));
        }

        if self.download.file_downloader.trim().is_empty() {
            return Err(crate::Error::config(
                "file_downloader",
                "downloader binary name must not be empty",
            ));
        }

        Ok(())
    }

    /// Authentication endpoint (POST registration number + password)
    pub fn login_url(&self) -> String {
        format!("{}/Account/Login", self.portal.base_url)
    }

    /// Authenticated-only page used to probe whether a loaded cookie store
    /// is still usable
    pub fn routine_url(&self) -> String {
        format!("{}/Routine", self.portal.base_url)
    }

    /// Routine listing endpoint (POST type/course/subject/filter parameters)
    pub fn routine_ajax_url(&self) -> String {
        format!("{}/Routine/LoadRoutineAjax", self.portal.base_url)
    }
}
