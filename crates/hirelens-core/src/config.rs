//! Configuration management for HireLens.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main application configuration.
///
/// This is loaded from `~/.config/hirelens/config.toml` (or platform
/// equivalent). If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Search behavior settings
    pub search: SearchConfig,
    /// Browser automation settings
    pub browser: BrowserConfig,
    /// Hiring classifier settings
    pub classifier: ClassifierConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(&config_path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `HIRELENS_MAX_RESULTS`: Override the search result cap
    /// - `HIRELENS_DELAY_SECS`: Override the inter-request delay
    /// - `HIRELENS_HEADLESS`: Override browser headless mode (true/false)
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;

        // Override from environment
        if let Ok(val) = std::env::var("HIRELENS_MAX_RESULTS") {
            if let Ok(max) = val.parse() {
                config.search.max_results = max;
                tracing::debug!("Override search.max_results from env: {}", max);
            }
        }

        if let Ok(val) = std::env::var("HIRELENS_DELAY_SECS") {
            if let Ok(secs) = val.parse() {
                config.search.delay_between_requests_secs = secs;
                tracing::debug!("Override search.delay_between_requests_secs from env: {}", secs);
            }
        }

        if let Ok(val) = std::env::var("HIRELENS_HEADLESS") {
            if let Ok(headless) = val.parse() {
                config.browser.headless = headless;
                tracing::debug!("Override browser.headless from env: {}", headless);
            }
        }

        Ok(config)
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        let config_path = Self::config_path()?;
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "config_path".to_string(),
                reason: "no parent directory".to_string(),
            })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", config_path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/hirelens/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "hirelens", "hirelens").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory path.
    ///
    /// Per-country session directories live under here.
    pub fn data_dir() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "hirelens", "hirelens").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.data_dir().to_path_buf())
    }
}

/// Search behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of candidate posts to collect per run
    pub max_results: usize,
    /// Delay between successive page interactions in seconds
    pub delay_between_requests_secs: u64,
    /// Default search query when none is given on the command line
    pub default_query: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: 50,
            delay_between_requests_secs: 2,
            default_query: "mobile developer hiring".to_string(),
        }
    }
}

/// Browser automation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    pub headless: bool,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
    /// Per-post navigation timeout in seconds
    pub navigation_timeout_secs: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1280,
            window_height: 800,
            navigation_timeout_secs: 30,
        }
    }
}

/// Hiring classifier settings.
///
/// The keyword and job-title defaults mirror the phrases the tool has
/// always shipped with; all three lists are plain case-insensitive
/// substring phrases.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Phrases that directly announce hiring
    pub search_keywords: Vec<String>,
    /// Job-title phrases that count as hiring when paired with an intent cue
    pub job_titles: Vec<String>,
    /// Hiring-intent cues paired with job titles
    pub intent_cues: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            search_keywords: vec![
                "hiring".to_string(),
                "we are hiring".to_string(),
                "looking for".to_string(),
                "job opening".to_string(),
            ],
            job_titles: vec![
                "mobile developer".to_string(),
                "app developer".to_string(),
                "ios developer".to_string(),
                "android developer".to_string(),
            ],
            intent_cues: vec![
                "join our team".to_string(),
                "open position".to_string(),
                "apply now".to_string(),
                "send your resume".to_string(),
            ],
        }
    }
}
