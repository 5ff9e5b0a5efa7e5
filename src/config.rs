//! Configuration management for todoist-log
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{Result, TodoistLogError};
use crate::input::parse_time;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for todoist-log
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Remote API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Defaults offered by the interactive range prompts
    #[serde(default)]
    pub range: RangeDefaults,
    /// Report output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Completed-items API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the service (useful for tests and local mocks)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the completed-items endpoint, appended to `base_url`
    #[serde(default = "default_completed_path")]
    pub completed_path: String,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Offset increment between page requests
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

fn default_base_url() -> String {
    "https://api.todoist.com".to_string()
}

fn default_completed_path() -> String {
    "/sync/v9/completed/get_all".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_page_size() -> u64 {
    crate::todoist::DEFAULT_PAGE_SIZE
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            completed_path: default_completed_path(),
            timeout_seconds: default_timeout_seconds(),
            page_size: default_page_size(),
        }
    }
}

impl ApiConfig {
    /// Full URL of the completed-items endpoint
    ///
    /// # Examples
    ///
    /// ```
    /// use todoist_log::config::ApiConfig;
    ///
    /// let api = ApiConfig {
    ///     base_url: "http://127.0.0.1:8080/".to_string(),
    ///     ..Default::default()
    /// };
    /// assert_eq!(
    ///     api.completed_url(),
    ///     "http://127.0.0.1:8080/sync/v9/completed/get_all"
    /// );
    /// ```
    pub fn completed_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.completed_path.trim_start_matches('/')
        )
    }
}

/// Defaults for the start and end of the query range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeDefaults {
    /// Start date default, in days before today
    #[serde(default = "default_start_days_ago")]
    pub start_days_ago: u32,

    /// Start time default (`HH:MM:SS`)
    #[serde(default = "default_start_time")]
    pub start_time: String,

    /// End date default, in days before today
    #[serde(default = "default_end_days_ago")]
    pub end_days_ago: u32,

    /// End time default (`HH:MM:SS`)
    #[serde(default = "default_end_time")]
    pub end_time: String,
}

fn default_start_days_ago() -> u32 {
    8
}

fn default_start_time() -> String {
    "00:00:00".to_string()
}

fn default_end_days_ago() -> u32 {
    1
}

fn default_end_time() -> String {
    "23:59:59".to_string()
}

impl Default for RangeDefaults {
    fn default() -> Self {
        Self {
            start_days_ago: default_start_days_ago(),
            start_time: default_start_time(),
            end_days_ago: default_end_days_ago(),
            end_time: default_end_time(),
        }
    }
}

/// Report output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the report file is written to
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,

    /// Wait for Enter before the process exits
    #[serde(default = "default_pause_on_exit")]
    pub pause_on_exit: bool,
}

fn default_output_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_pause_on_exit() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            pause_on_exit: default_pause_on_exit(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| TodoistLogError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| TodoistLogError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        self.apply_env_overrides(|key| std::env::var(key).ok());
    }

    /// Apply `TODOIST_LOG_*` overrides read through `lookup`
    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(base_url) = lookup("TODOIST_LOG_BASE_URL") {
            tracing::debug!(base_url = %base_url, "Env override: TODOIST_LOG_BASE_URL");
            self.api.base_url = base_url;
        }

        if let Some(timeout) = lookup("TODOIST_LOG_TIMEOUT_SECONDS") {
            match timeout.parse() {
                Ok(value) => self.api.timeout_seconds = value,
                Err(_) => tracing::warn!("Invalid TODOIST_LOG_TIMEOUT_SECONDS: {}", timeout),
            }
        }

        if let Some(page_size) = lookup("TODOIST_LOG_PAGE_SIZE") {
            match page_size.parse() {
                Ok(value) => self.api.page_size = value,
                Err(_) => tracing::warn!("Invalid TODOIST_LOG_PAGE_SIZE: {}", page_size),
            }
        }

        if let Some(dir) = lookup("TODOIST_LOG_OUTPUT_DIR") {
            tracing::debug!(output_dir = %dir, "Env override: TODOIST_LOG_OUTPUT_DIR");
            self.output.directory = PathBuf::from(dir);
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        if let Some(dir) = &cli.output_dir {
            self.output.directory = dir.clone();
        }

        if cli.no_pause {
            self.output.pause_on_exit = false;
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.api.base_url).map_err(|e| {
            TodoistLogError::Config(format!(
                "api.base_url '{}' is not a valid URL: {}",
                self.api.base_url, e
            ))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(TodoistLogError::Config(format!(
                "api.base_url must use http or https, got '{}'",
                url.scheme()
            ))
            .into());
        }

        if self.api.timeout_seconds == 0 {
            return Err(TodoistLogError::Config(
                "api.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.api.page_size == 0 {
            return Err(
                TodoistLogError::Config("api.page_size must be greater than 0".to_string()).into(),
            );
        }

        for (field, value) in [
            ("range.start_time", &self.range.start_time),
            ("range.end_time", &self.range.end_time),
        ] {
            if parse_time(value).is_err() {
                return Err(TodoistLogError::Config(format!(
                    "{} must be in HH:MM:SS format, got '{}'",
                    field, value
                ))
                .into());
            }
        }

        Ok(())
    }
}
