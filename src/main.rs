//! Memento Cache - command-line access to a file-backed expiring cache
//!
//! Opens the JSON store file, loads the cache under the configured namespace,
//! runs one command and exits.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use memento_cache::{Config, ExpiringCache, FileMemento};

/// Get and set expiring values in a file-backed cache
#[derive(Debug, Parser)]
#[command(name = "memento-cache", version, about)]
struct Cli {
    /// Store file (overrides CACHE_STATE_PATH)
    #[arg(long)]
    state: Option<PathBuf>,

    /// Namespace key (overrides CACHE_NAMESPACE)
    #[arg(long)]
    namespace: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the value stored under KEY
    Get { key: String },
    /// Store VALUE under KEY; VALUE is parsed as JSON, else stored as a string
    Set {
        key: String,
        value: String,
        /// Lifetime in seconds; 0 or omitted never expires
        #[arg(long)]
        ttl: Option<u64>,
    },
    /// List keys that have not expired
    Keys,
    /// Remove expired entries from the store
    Purge,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Defaults to "warn" so command output stays clean; override with RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memento_cache=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::from_env();
    let state_path = cli.state.unwrap_or(config.state_path);
    let namespace = cli.namespace.unwrap_or(config.namespace);
    debug!(state = %state_path.display(), namespace = %namespace, "configuration loaded");

    let store = FileMemento::open(&state_path)
        .await
        .with_context(|| format!("failed to open store {}", state_path.display()))?;
    let mut cache = ExpiringCache::new(store, Some(namespace.as_str()))
        .with_context(|| format!("failed to load namespace '{}'", namespace))?;

    match cli.command {
        Command::Get { key } => match cache.get_value(&key) {
            Some(value) => println!("{}", value),
            None => {
                eprintln!("(not found) {}", key);
                return Ok(ExitCode::FAILURE);
            }
        },
        Command::Set { key, value, ttl } => {
            let value = parse_value(&value);
            cache
                .set(key.as_str(), value, ttl)
                .await
                .with_context(|| format!("failed to store '{}'", key))?;
            info!("Stored key '{}'", key);
            println!("OK");
        }
        Command::Keys => {
            let mut keys = cache.keys();
            keys.sort();
            for key in keys {
                println!("{}", key);
            }
        }
        Command::Purge => {
            let removed = cache.purge_expired().await.context("failed to purge")?;
            println!("{}", removed);
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Interprets command-line input as JSON, falling back to a plain string.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
