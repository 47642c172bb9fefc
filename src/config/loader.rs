//! Configuration loading utilities
//!
//! Provides helper functions for loading configuration from various sources
//! with proper error handling and validation.

use crate::{Result, config::Settings};
use std::path::Path;
use tracing::{debug, info, warn};

/// Configuration loader with multiple source support
#[derive(Debug)]
pub struct ConfigLoader {
    /// Default settings
    defaults: Settings,
}

impl ConfigLoader {
    /// Create new configuration loader
    pub fn new() -> Self {
        Self {
            defaults: Settings::default(),
        }
    }

    /// Get the config file path from UDVASH_CONFIG environment variable or
    /// default location
    ///
    /// Priority:
    /// 1. UDVASH_CONFIG environment variable
    /// 2. ~/.config/udvash-dl/config.toml (or platform equivalent)
    pub fn get_config_path() -> Option<std::path::PathBuf> {
        if let Ok(config_path) = std::env::var("UDVASH_CONFIG") {
            let path = std::path::PathBuf::from(config_path);
            if path.exists() {
                debug!("Using config file from UDVASH_CONFIG: {:?}", path);
                return Some(path);
            } else {
                warn!("UDVASH_CONFIG points to non-existent file: {:?}", path);
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let default_path = config_dir.join("udvash-dl").join("config.toml");
            if default_path.exists() {
                debug!("Using default config file: {:?}", default_path);
                return Some(default_path);
            }
        }

        debug!("No config file found");
        None
    }

    /// Load configuration with precedence order:
    /// 1. Environment variables (highest priority)
    /// 2. Configuration file
    /// 3. Default values (lowest priority)
    pub fn load(&self, config_file: Option<&Path>) -> Result<Settings> {
        let mut settings = self.defaults.clone();

        if let Some(path) = config_file {
            if path.exists() {
                info!("Loading configuration from file: {:?}", path);
                settings = Settings::from_file(path)?;
            } else {
                warn!("Configuration file not found: {:?}, using defaults", path);
            }
        }

        debug!("Applying environment variable overrides");
        settings = settings.merge_with_env()?;

        settings.validate()?;

        debug!("Final configuration: {:?}", settings);

        Ok(settings)
    }

    /// Load configuration from environment only
    pub fn from_env_only(&self) -> Result<Settings> {
        let settings = Settings::from_env()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Get default configuration
    pub fn defaults(&self) -> &Settings {
        &self.defaults
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Static mutex to ensure environment variable tests don't interfere with each other
    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_load_defaults() {
        let _lock = ENV_TEST_MUTEX.lock().unwrap();

        let loader = ConfigLoader::new();
        let defaults = loader.defaults();
        assert_eq!(
            defaults.portal.base_url,
            "https://online.udvash-unmesh.com"
        );
        assert_eq!(defaults.download.video_downloader, "yt-dlp");
    }

    #[test]
    fn test_load_from_file() {
        let _lock = ENV_TEST_MUTEX.lock().unwrap();

        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[portal]
base_url = "http://localhost:9000"

[network]
request_timeout = 120
        "#
        )
        .unwrap();

        let loader = ConfigLoader::new();
        let settings = loader.load(Some(temp_file.path())).unwrap();

        assert_eq!(settings.portal.base_url, "http://localhost:9000");
        assert_eq!(settings.network.request_timeout, 120);
    }

    #[test]
    fn test_env_var_override() {
        let _lock = ENV_TEST_MUTEX.lock().unwrap();

        let original = std::env::var("UDVASH_BASE_URL").ok();

        unsafe {
            std::env::set_var("UDVASH_BASE_URL", "http://10.0.0.1:8888");
        }

        let loader = ConfigLoader::new();
        let settings = loader.from_env_only().unwrap();

        assert_eq!(settings.portal.base_url, "http://10.0.0.1:8888");

        unsafe {
            std::env::remove_var("UDVASH_BASE_URL");
            if let Some(value) = original {
                std::env::set_var("UDVASH_BASE_URL", value);
            }
        }
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let _lock = ENV_TEST_MUTEX.lock().unwrap();

        let loader = ConfigLoader::new();
        let settings = loader
            .load(Some(Path::new("/nonexistent/udvash-dl.toml")))
            .unwrap();
        assert_eq!(
            settings.portal.base_url,
            "https://online.udvash-unmesh.com"
        );
    }
}
