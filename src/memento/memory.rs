//! In-memory store backed by a shared `HashMap`.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde_json::Value;

use super::Memento;
use crate::error::{CacheError, Result};

/// Process-local `Memento`.
///
/// Clones share the same underlying map, so a test can keep one handle to
/// inspect what a cache persisted through another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMemento {
    values: Arc<RwLock<HashMap<String, Value>>>,
}

impl InMemoryMemento {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `entries`.
    pub fn with_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let values = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self {
            values: Arc::new(RwLock::new(values)),
        }
    }

    /// Returns a copy of the value stored under `key`, if any.
    pub fn snapshot(&self, key: &str) -> Option<Value> {
        self.values
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }
}

#[async_trait]
impl Memento for InMemoryMemento {
    fn read(&self, key: &str, default: Value) -> Result<Value> {
        let values = self
            .values
            .read()
            .map_err(|_| CacheError::Store("in-memory store lock poisoned".to_string()))?;
        Ok(values.get(key).cloned().unwrap_or(default))
    }

    async fn write(&self, key: &str, value: Value) -> Result<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| CacheError::Store("in-memory store lock poisoned".to_string()))?;
        values.insert(key.to_string(), value);
        Ok(())
    }

    fn list_keys(&self) -> Vec<String> {
        self.values
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .keys()
            .cloned()
            .collect()
    }
}
