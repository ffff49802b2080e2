//! Configuration loading and setting resolution
//!
//! Settings resolve in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing TOML file is not an error: a warning is logged and compiled
//! defaults apply. A TOML file that exists but cannot be parsed is an error.

use crate::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Application directory name under the platform config dir
const APP_DIR: &str = "imeta";
/// Config file name inside [`APP_DIR`]
const CONFIG_FILE: &str = "imeta.toml";

/// Bootstrap configuration loaded from TOML file
///
/// Every field is optional; anything absent falls through to compiled defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Enrichment cache and upstream settings
    #[serde(default)]
    pub enrichment: EnrichmentToml,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive (trace, debug, info, warn, error)
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

fn default_log_level() -> String {
    "info".to_string()
}

/// `[enrichment]` table
///
/// Durations are kept as strings and parsed by
/// [`crate::human_time::parse_duration`] during resolution.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnrichmentToml {
    /// Freshness window for cached records (e.g. "24h")
    pub cache_ttl: Option<String>,
    /// Minimum spacing between upstream call starts (e.g. "5s")
    pub min_interval: Option<String>,
    /// Upstream base URL
    pub upstream_url: Option<String>,
    /// Upstream request timeout (e.g. "7s")
    pub upstream_timeout: Option<String>,
    /// Optional cap on cached entries
    pub cache_max_entries: Option<usize>,
}

/// Where a resolved setting came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    CommandLine,
    Environment,
    TomlFile,
    Default,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConfigSource::CommandLine => "command line",
            ConfigSource::Environment => "environment",
            ConfigSource::TomlFile => "TOML",
            ConfigSource::Default => "default",
        };
        f.write_str(s)
    }
}

/// Resolve one string setting following CLI → ENV → TOML priority.
///
/// Returns `None` when no source provides a non-blank value; callers then
/// apply their compiled default.
pub fn resolve_value(
    cli_arg: Option<&str>,
    env_var_name: &str,
    toml_value: Option<&str>,
) -> Option<(String, ConfigSource)> {
    // Priority 1: Command-line argument
    if let Some(value) = cli_arg.filter(|v| !v.trim().is_empty()) {
        return Some((value.trim().to_string(), ConfigSource::CommandLine));
    }

    // Priority 2: Environment variable
    if let Ok(value) = std::env::var(env_var_name) {
        if !value.trim().is_empty() {
            return Some((value.trim().to_string(), ConfigSource::Environment));
        }
    }

    // Priority 3: TOML config file
    if let Some(value) = toml_value.filter(|v| !v.trim().is_empty()) {
        return Some((value.trim().to_string(), ConfigSource::TomlFile));
    }

    None
}

/// Default config file path for the platform (`~/.config/imeta/imeta.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
}

/// Load TOML config from `path`.
///
/// Missing file → warning + `TomlConfig::default()`.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        warn!(
            "Config file not found at {}, using built-in defaults",
            path.display()
        );
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: TomlConfig = toml::from_str(&content)?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Load the config from an explicit path or the platform default location.
///
/// An explicitly named file must exist.
pub fn load_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            load_toml_config(path)
        }
        None => match default_config_path() {
            Some(path) => load_toml_config(&path),
            None => {
                warn!("Could not determine config directory, using built-in defaults");
                Ok(TomlConfig::default())
            }
        },
    }
}

/// Standard User-Agent string for outbound HTTP clients
pub fn get_user_agent() -> String {
    format!(
        "imeta/{} (+https://github.com/imeta/imeta)",
        env!("CARGO_PKG_VERSION")
    )
}
