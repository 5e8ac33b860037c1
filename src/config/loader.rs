//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "TYPOFIX_CONFIG";

/// Environment variable overriding the log file path.
pub const LOG_ENV: &str = "TYPOFIX_LOG";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/typofix/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Use colors and text attributes in the session view.
    #[serde(default)]
    pub color: Option<bool>,

    /// Blank columns between the frame and the page content.
    #[serde(default)]
    pub margin: Option<u16>,

    /// Number of status messages kept on screen.
    #[serde(default)]
    pub status_lines: Option<usize>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Colors enabled.
    pub color: bool,
    /// Frame padding in columns.
    pub margin: u16,
    /// Status log capacity.
    pub status_lines: usize,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            log_file_path: default_log_path(),
            color: true,
            margin: 3,
            status_lines: 5,
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/typofix/typofix.log` on Linux, the platform state
/// directory elsewhere, and `typofix.log` in the current directory when no
/// state directory exists.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("typofix").join("typofix.log"),
        None => PathBuf::from("typofix.log"),
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path: `~/.config/typofix/config.toml` on
/// Linux. `None` if the config directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("typofix").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `TYPOFIX_CONFIG` environment variable
/// 3. Default path `~/.config/typofix/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `TYPOFIX_LOG`: Override log file path
/// - `NO_COLOR`: Any non-empty value disables colors (<https://no-color.org>)
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(path) = std::env::var_os(LOG_ENV).filter(|v| !v.is_empty()) {
        config.log_file_path = PathBuf::from(path);
    }

    if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        config.color = false;
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        color: config.color.unwrap_or(defaults.color),
        margin: config.margin.unwrap_or(defaults.margin),
        status_lines: config.status_lines.unwrap_or(defaults.status_lines),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence. Only flags the user actually set
/// are passed as `Some`.
pub fn apply_cli_overrides(mut config: ResolvedConfig, color_override: Option<bool>) -> ResolvedConfig {
    if let Some(color) = color_override {
        config.color = color;
    }
    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
