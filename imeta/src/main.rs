//! imeta - issuer metadata lookup and payment outcome classification
//!
//! Operator CLI over the two library operations:
//! - `imeta lookup <KEY>...` prints issuer records as JSON
//! - `imeta classify <TEXT>` prints the canonical outcome as JSON

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use imeta::{CliOverrides, EnrichmentCache, EnrichmentSettings, ResponseClassifier};
use serde_json::json;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "imeta", version, about = "Issuer metadata enrichment and outcome classification")]
struct Cli {
    /// Path to TOML config (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Freshness window for cached records (e.g. 24h)
    #[arg(long, global = true)]
    ttl: Option<String>,

    /// Minimum spacing between upstream calls (e.g. 5s)
    #[arg(long, global = true)]
    min_interval: Option<String>,

    /// Upstream base URL
    #[arg(long, global = true)]
    upstream_url: Option<String>,

    /// Upstream request timeout (e.g. 7s)
    #[arg(long, global = true)]
    upstream_timeout: Option<String>,

    /// Maximum number of cached records
    #[arg(long, global = true)]
    cache_max_entries: Option<String>,

    /// Log level or filter directive
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Look up issuer metadata for one or more prefixes
    Lookup {
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Classify raw payment response text (JSON is accepted)
    Classify {
        #[arg(required = true)]
        text: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let toml_config = imeta_common::config::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;

    let overrides = CliOverrides {
        cache_ttl: cli.ttl.clone(),
        min_interval: cli.min_interval.clone(),
        upstream_url: cli.upstream_url.clone(),
        upstream_timeout: cli.upstream_timeout.clone(),
        cache_max_entries: cli.cache_max_entries.clone(),
        log_level: cli.log_level.clone(),
    };

    // Subscriber first, so the settings resolution below is logged
    let log_level = imeta::config::resolve_log_level(&overrides, &toml_config);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    info!("imeta {}", env!("CARGO_PKG_VERSION"));

    let settings = EnrichmentSettings::resolve(&overrides, &toml_config)
        .context("Invalid configuration")?;

    match cli.command {
        Command::Lookup { keys } => {
            let cache = EnrichmentCache::from_settings(&settings)
                .context("Failed to build upstream client")?;
            let results = cache.lookup_many(&keys).await;

            for (key, record) in results {
                println!("{}", serde_json::to_string(&json!({ "key": key, "record": record }))?);
            }
            info!(stats = ?cache.stats(), "Lookup finished");
        }
        Command::Classify { text } => {
            let classifier = ResponseClassifier::new();
            let classification = classifier.classify(&text.join(" "));
            println!("{}", serde_json::to_string(&classification)?);
        }
    }

    Ok(())
}
