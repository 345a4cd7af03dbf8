//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::aggregate::{offset_from_minutes, Granularity, ZoneSuffixNormalizer, IST_OFFSET_MINUTES};
use crate::render::IconStyle;

/// Backend URL used when nothing else is configured
pub const DEFAULT_BACKEND_URL: &str = "http://0.0.0.0:8080";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub timezone: TimezoneConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Summary backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub url: String,

    #[serde(default = "default_list_path")]
    pub list_path: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_list_path() -> String {
    "/list".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            list_path: default_list_path(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl BackendConfig {
    /// Full URL of the summary endpoint
    pub fn list_url(&self) -> String {
        let base = self.url.trim_end_matches('/');
        let path = self.list_path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }
}

/// Dashboard presentation settings
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub granularity: Granularity,

    #[serde(default = "default_latest_window")]
    pub latest_window_hours: i64,

    #[serde(default = "default_chart_height")]
    pub chart_height: usize,

    #[serde(default = "default_bar_width")]
    pub bar_width: usize,

    #[serde(default)]
    pub icons: IconStyle,
}

fn default_latest_window() -> i64 {
    24
}

fn default_chart_height() -> usize {
    10
}

fn default_bar_width() -> usize {
    8
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            granularity: Granularity::default(),
            latest_window_hours: default_latest_window(),
            chart_height: default_chart_height(),
            bar_width: default_bar_width(),
            icons: IconStyle::default(),
        }
    }
}

/// Timestamp interpretation settings
#[derive(Debug, Clone, Deserialize)]
pub struct TimezoneConfig {
    /// Offset labels are computed in, minutes east of UTC
    #[serde(default = "default_display_offset")]
    pub display_offset_minutes: i32,

    /// Zone abbreviations the backend appends, mapped to minutes east of UTC
    #[serde(default = "default_suffixes")]
    pub suffixes: BTreeMap<String, i32>,
}

fn default_display_offset() -> i32 {
    IST_OFFSET_MINUTES
}

fn default_suffixes() -> BTreeMap<String, i32> {
    BTreeMap::from([
        ("IST".to_string(), IST_OFFSET_MINUTES),
        ("UTC".to_string(), 0),
        ("GMT".to_string(), 0),
    ])
}

impl Default for TimezoneConfig {
    fn default() -> Self {
        Self {
            display_offset_minutes: default_display_offset(),
            suffixes: default_suffixes(),
        }
    }
}

impl TimezoneConfig {
    /// Build the timestamp normalizer described by this section
    pub fn normalizer(&self) -> Result<ZoneSuffixNormalizer, ConfigError> {
        let display = offset_from_minutes(self.display_offset_minutes).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "display_offset_minutes out of range: {}",
                self.display_offset_minutes
            ))
        })?;

        let mut normalizer = ZoneSuffixNormalizer::new(display);
        for (abbreviation, minutes) in &self.suffixes {
            let offset = offset_from_minutes(*minutes).ok_or_else(|| {
                ConfigError::Invalid(format!("offset for {} out of range: {}", abbreviation, minutes))
            })?;
            normalizer = normalizer.with_suffix(abbreviation, offset);
        }

        Ok(normalizer)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Standard config file locations, in search order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("tenant-dashboard").join("config.toml")),
            Some(PathBuf::from("/etc/tenant-dashboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load from default locations or environment
    pub fn load_default() -> ConfigSearch {
        Self::search(&Self::default_paths())
    }

    /// Load the first readable file among `paths`, falling back to the
    /// environment
    ///
    /// Files that exist but fail to load are reported in
    /// [`ConfigSearch::failures`] so the caller can log them once logging is
    /// set up.
    pub fn search(paths: &[PathBuf]) -> ConfigSearch {
        let mut failures = Vec::new();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => {
                    return ConfigSearch {
                        config,
                        source: Some(path.clone()),
                        failures,
                    }
                }
                Err(e) => failures.push(e),
            }
        }

        ConfigSearch {
            config: Self::from_env(),
            source: None,
            failures,
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Backend overrides
        if let Ok(url) = std::env::var("TENANT_DASHBOARD_BACKEND_URL") {
            self.backend.url = url;
        }
        if let Ok(timeout) = std::env::var("TENANT_DASHBOARD_TIMEOUT_SECS") {
            if let Ok(t) = timeout.parse() {
                self.backend.request_timeout_secs = t;
            }
        }

        // Dashboard overrides
        if let Ok(granularity) = std::env::var("TENANT_DASHBOARD_GRANULARITY") {
            match granularity.parse() {
                Ok(g) => self.dashboard.granularity = g,
                Err(e) => tracing::warn!("Ignoring TENANT_DASHBOARD_GRANULARITY: {}", e),
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("TENANT_DASHBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("TENANT_DASHBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Result of searching the default config locations
#[derive(Debug)]
pub struct ConfigSearch {
    pub config: Config,
    /// File the config was read from, `None` for defaults plus environment
    pub source: Option<PathBuf>,
    /// Files that were found but could not be loaded
    pub failures: Vec<ConfigError>,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Tenant Dashboard Configuration
#
# Environment variables override these settings:
# - TENANT_DASHBOARD_BACKEND_URL
# - TENANT_DASHBOARD_TIMEOUT_SECS
# - TENANT_DASHBOARD_GRANULARITY
# - TENANT_DASHBOARD_LOG_LEVEL
# - TENANT_DASHBOARD_LOG_FORMAT

[backend]
# Base URL of the tenant backend
url = "http://0.0.0.0:8080"

# Path of the summary endpoint
list_path = "/list"

# Request timeout in seconds
request_timeout_secs = 30

[dashboard]
# Chart bucketing: day or month
granularity = "day"

# Window for the "Latest (24h)" card, in hours
latest_window_hours = 24

# Height of the terminal bar chart in rows
chart_height = 10

# Columns per bar in the terminal chart
bar_width = 8

# Card icons: emoji or ascii
icons = "emoji"

[timezone]
# Offset chart labels are computed in (minutes east of UTC, 330 = IST)
display_offset_minutes = 330

# Zone abbreviations appended to createdAt, in minutes east of UTC
[timezone.suffixes]
IST = 330
UTC = 0
GMT = 0

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
