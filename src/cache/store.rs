//! Cache Store Module
//!
//! Main cache engine: a HashMap of entries mirrored into a `Memento` under a
//! single namespace key, with expiration checked on every read.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::cache::{current_timestamp, CacheEntry, DEFAULT_NAMESPACE};
use crate::error::{CacheError, Result};
use crate::memento::Memento;

// == Expiring Cache ==
/// Key-value cache with optional per-entry expiration.
///
/// Reads are served from the in-memory mapping. Every `set` rewrites the whole
/// mapping into the backing store under `namespace`. Expired entries read as
/// absent but stay in the mapping until they are overwritten or
/// [`purge_expired`](Self::purge_expired) runs.
#[derive(Debug)]
pub struct ExpiringCache<M> {
    /// Backing persistent store
    store: M,
    /// Store key holding the entry mapping
    namespace: String,
    /// Live working set
    entries: HashMap<String, CacheEntry>,
}

impl<M: Memento> ExpiringCache<M> {
    // == Constructor ==
    /// Creates a cache over `store`, loading any entries already persisted
    /// under `namespace`.
    ///
    /// A missing or empty namespace falls back to [`DEFAULT_NAMESPACE`].
    ///
    /// # Errors
    /// - `CacheError::Store` if the store cannot be read
    /// - `CacheError::MalformedSnapshot` if the stored data is not an entry mapping
    pub fn new(store: M, namespace: Option<&str>) -> Result<Self> {
        let namespace = namespace
            .filter(|ns| !ns.is_empty())
            .unwrap_or(DEFAULT_NAMESPACE)
            .to_string();

        let raw = store.read(&namespace, Value::Object(Map::new()))?;
        let entries = HashMap::<String, CacheEntry>::deserialize(raw).map_err(|source| {
            CacheError::MalformedSnapshot {
                namespace: namespace.clone(),
                source,
            }
        })?;

        debug!(namespace = %namespace, entries = entries.len(), "cache loaded");

        Ok(Self {
            store,
            namespace,
            entries,
        })
    }

    /// Creates a cache under the default namespace.
    pub fn with_default_namespace(store: M) -> Result<Self> {
        Self::new(store, None)
    }

    // == Get ==
    /// Retrieves the value stored under `key`, decoded as `T`.
    ///
    /// Returns `Ok(None)` if the key was never set or its entry has expired.
    ///
    /// # Errors
    /// `CacheError::TypeMismatch` if the stored value does not decode as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_value(key) {
            Some(value) => T::deserialize(value)
                .map(Some)
                .map_err(|source| CacheError::TypeMismatch {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    /// Returns the raw stored value for `key` if present and not expired.
    pub fn get_value(&self, key: &str) -> Option<&Value> {
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| &entry.value)
    }

    // == Set ==
    /// Stores `value` under `key` and persists the whole mapping.
    ///
    /// An existing entry is overwritten. `expiration` is a lifetime in seconds
    /// from now; `None` and `Some(0)` both mean the entry never expires.
    ///
    /// If the store write fails the in-memory mapping keeps the new entry, so
    /// the cache and the store diverge until the next successful write.
    ///
    /// # Errors
    /// - `CacheError::Serialization` if `value` cannot be encoded (nothing is changed)
    /// - `CacheError::Store` / `CacheError::Io` if persisting fails
    pub async fn set<V: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: V,
        expiration: Option<u64>,
    ) -> Result<()> {
        let value = serde_json::to_value(value)?;
        let entry = CacheEntry::new(value, expiration);

        self.entries.insert(key.into(), entry);
        self.persist().await
    }

    // == Purge Expired ==
    /// Removes every expired entry, persisting the mapping if anything was
    /// removed.
    ///
    /// Returns the number of entries removed.
    pub async fn purge_expired(&mut self) -> Result<usize> {
        let now = current_timestamp();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));

        let removed = before - self.entries.len();
        if removed > 0 {
            self.persist().await?;
        }
        Ok(removed)
    }

    /// Writes the full entry mapping to the store under the namespace.
    async fn persist(&self) -> Result<()> {
        let snapshot = serde_json::to_value(&self.entries)?;
        self.store.write(&self.namespace, snapshot).await?;

        debug!(namespace = %self.namespace, entries = self.entries.len(), "cache persisted");
        Ok(())
    }

    // == Time To Live ==
    /// Seconds until `key` expires, or None if it is absent, expired or never expires.
    pub fn ttl_remaining(&self, key: &str) -> Option<u64> {
        let now = current_timestamp();
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
            .and_then(|entry| entry.ttl_remaining_at(now))
    }

    /// Keys whose entries have not expired.
    pub fn keys(&self) -> Vec<String> {
        let now = current_timestamp();
        self.entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// The store key holding this cache's entries.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The backing store.
    pub fn store(&self) -> &M {
        &self.store
    }

    // == Length ==
    /// Returns the number of entries held, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
