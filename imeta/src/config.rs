//! Runtime settings resolution for imeta
//!
//! **Priority:** CLI → ENV → TOML → compiled default, one setting at a time.

use crate::services::DEFAULT_UPSTREAM_URL;
use imeta_common::config::{resolve_value, ConfigSource, TomlConfig};
use imeta_common::human_time::{format_duration, parse_duration};
use imeta_common::{Error, Result};
use std::time::Duration;
use tracing::info;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(7);
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const ENV_CACHE_TTL: &str = "IMETA_CACHE_TTL";
pub const ENV_MIN_INTERVAL: &str = "IMETA_MIN_INTERVAL";
pub const ENV_UPSTREAM_URL: &str = "IMETA_UPSTREAM_URL";
pub const ENV_UPSTREAM_TIMEOUT: &str = "IMETA_UPSTREAM_TIMEOUT";
pub const ENV_CACHE_MAX_ENTRIES: &str = "IMETA_CACHE_MAX_ENTRIES";
pub const ENV_LOG_LEVEL: &str = "IMETA_LOG_LEVEL";

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub cache_ttl: Option<String>,
    pub min_interval: Option<String>,
    pub upstream_url: Option<String>,
    pub upstream_timeout: Option<String>,
    pub cache_max_entries: Option<String>,
    pub log_level: Option<String>,
}

/// Fully resolved settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentSettings {
    pub cache_ttl: Duration,
    pub min_interval: Duration,
    pub upstream_url: String,
    pub upstream_timeout: Duration,
    /// `None` = unbounded
    pub cache_max_entries: Option<usize>,
    pub log_level: String,
}

impl Default for EnrichmentSettings {
    fn default() -> Self {
        Self {
            cache_ttl: DEFAULT_CACHE_TTL,
            min_interval: DEFAULT_MIN_INTERVAL,
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            upstream_timeout: DEFAULT_UPSTREAM_TIMEOUT,
            cache_max_entries: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl EnrichmentSettings {
    /// Resolve every setting from its sources
    pub fn resolve(cli: &CliOverrides, toml: &TomlConfig) -> Result<Self> {
        let defaults = Self::default();
        let enrichment = &toml.enrichment;

        let cache_ttl = resolve_duration(
            "cache_ttl",
            cli.cache_ttl.as_deref(),
            ENV_CACHE_TTL,
            enrichment.cache_ttl.as_deref(),
            defaults.cache_ttl,
        )?;

        let min_interval = resolve_duration(
            "min_interval",
            cli.min_interval.as_deref(),
            ENV_MIN_INTERVAL,
            enrichment.min_interval.as_deref(),
            defaults.min_interval,
        )?;

        let upstream_timeout = resolve_duration(
            "upstream_timeout",
            cli.upstream_timeout.as_deref(),
            ENV_UPSTREAM_TIMEOUT,
            enrichment.upstream_timeout.as_deref(),
            defaults.upstream_timeout,
        )?;
        if upstream_timeout.is_zero() {
            return Err(Error::Config("upstream_timeout must be greater than zero".to_string()));
        }

        let upstream_url = match resolve_value(
            cli.upstream_url.as_deref(),
            ENV_UPSTREAM_URL,
            enrichment.upstream_url.as_deref(),
        ) {
            Some((url, source)) => {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(Error::Config(format!(
                        "upstream_url from {} must be an http(s) URL, got '{}'",
                        source, url
                    )));
                }
                info!("upstream_url loaded from {}", source);
                url
            }
            None => defaults.upstream_url,
        };

        let toml_max = enrichment.cache_max_entries.map(|n| n.to_string());
        let cache_max_entries = match resolve_value(
            cli.cache_max_entries.as_deref(),
            ENV_CACHE_MAX_ENTRIES,
            toml_max.as_deref(),
        ) {
            Some((raw, source)) => {
                let max: usize = raw.parse().map_err(|_| {
                    Error::Config(format!(
                        "cache_max_entries from {} is not a number: '{}'",
                        source, raw
                    ))
                })?;
                if max == 0 {
                    return Err(Error::Config("cache_max_entries must be at least 1".to_string()));
                }
                Some(max)
            }
            None => None,
        };

        let log_level = resolve_log_level(cli, toml);

        Ok(Self {
            cache_ttl,
            min_interval,
            upstream_url,
            upstream_timeout,
            cache_max_entries,
            log_level,
        })
    }
}

/// Resolve the log filter alone.
///
/// The binary needs it before the subscriber exists, ahead of [`EnrichmentSettings::resolve`].
pub fn resolve_log_level(cli: &CliOverrides, toml: &TomlConfig) -> String {
    resolve_value(
        cli.log_level.as_deref(),
        ENV_LOG_LEVEL,
        Some(toml.logging.level.as_str()),
    )
    .map(|(level, _)| level)
    .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

fn resolve_duration(
    name: &str,
    cli_arg: Option<&str>,
    env_var_name: &str,
    toml_value: Option<&str>,
    default: Duration,
) -> Result<Duration> {
    match resolve_value(cli_arg, env_var_name, toml_value) {
        Some((raw, source)) => {
            let duration = parse_duration(&raw)
                .map_err(|e| Error::Config(format!("{} from {}: {}", name, source, e)))?;
            info!("{} = {} (from {})", name, format_duration(duration), source);
            Ok(duration)
        }
        None => {
            info!(
                "{} = {} (from {})",
                name,
                format_duration(default),
                ConfigSource::Default
            );
            Ok(default)
        }
    }
}
