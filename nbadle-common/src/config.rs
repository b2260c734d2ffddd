//! Bootstrap configuration loading
//!
//! Config file resolution priority:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. Platform config directory (`<config_dir>/nbadle/nbadle.toml`)
//! 4. Compiled defaults (fallback)
//!
//! A config file that does not exist is not an error: compiled defaults are
//! used. A file that exists but cannot be parsed is.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "NBADLE_CONFIG";

/// File name looked up in the platform config directory
pub const CONFIG_FILE_NAME: &str = "nbadle.toml";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Interface the HTTP server binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path to the player roster JSON file
    #[serde(default = "default_roster_path")]
    pub roster_path: PathBuf,

    /// Stats service client settings
    #[serde(default)]
    pub stats_api: StatsApiConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Stats service (attribute provider) settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout handed to the provider
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Attempts per lookup before falling back to roster clues
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay after a timed-out attempt
    #[serde(default = "default_timeout_backoff_ms")]
    pub timeout_backoff_ms: u64,

    /// Delay after any other failed attempt
    #[serde(default = "default_error_backoff_ms")]
    pub error_backoff_ms: u64,

    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
}

impl Default for StatsApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout_ms(),
            max_attempts: default_max_attempts(),
            timeout_backoff_ms: default_timeout_backoff_ms(),
            error_backoff_ms: default_error_backoff_ms(),
            requests_per_second: default_requests_per_second(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            roster_path: default_roster_path(),
            stats_api: StatsApiConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5730
}

fn default_roster_path() -> PathBuf {
    PathBuf::from("nba_players_list.json")
}

fn default_base_url() -> String {
    "https://stats.nba.com/stats".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_max_attempts() -> u32 {
    3
}

fn default_timeout_backoff_ms() -> u64 {
    2_000
}

fn default_error_backoff_ms() -> u64 {
    1_000
}

fn default_requests_per_second() -> u32 {
    2
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse and validate a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: TomlConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config file at `path`, or compiled defaults when it is absent
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => Self::from_file(path),
            _ => Ok(Self::default()),
        }
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.stats_api.max_attempts == 0 {
            return Err(Error::Config(
                "stats_api.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.stats_api.requests_per_second == 0 {
            return Err(Error::Config(
                "stats_api.requests_per_second must be at least 1".to_string(),
            ));
        }
        if self.stats_api.base_url.trim().is_empty() {
            return Err(Error::Config("stats_api.base_url is empty".to_string()));
        }
        Ok(())
    }
}

/// Locate the config file following the priority order above
///
/// Returns `None` when no explicit path was given and the platform config
/// directory cannot be determined.
pub fn resolve_config_path(cli_arg: Option<&Path>, env_var_name: &str) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    // Priority 3: Platform config directory
    dirs::config_dir().map(|dir| dir.join("nbadle").join(CONFIG_FILE_NAME))
}
