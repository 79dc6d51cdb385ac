//! Configuration Module
//!
//! Handles loading the command-line tool's settings from environment variables.

use std::env;
use std::path::PathBuf;

use crate::cache::DEFAULT_NAMESPACE;

/// Default location of the file-backed store.
pub const DEFAULT_STATE_PATH: &str = "memento-cache.json";

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Store key under which the entry mapping is persisted
    pub namespace: String,
    /// Path of the JSON document backing the store
    pub state_path: PathBuf,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_NAMESPACE` - Namespace key (default: "cache")
    /// - `CACHE_STATE_PATH` - Store file path (default: "memento-cache.json")
    pub fn from_env() -> Self {
        Self {
            namespace: env::var("CACHE_NAMESPACE")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
            state_path: env::var("CACHE_STATE_PATH")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_PATH)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            state_path: PathBuf::from(DEFAULT_STATE_PATH),
        }
    }
}
