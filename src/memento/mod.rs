//! Memento Module
//!
//! The persistent key/value store the cache mirrors its entries into. The
//! store is supplied by the host; this module defines the capability the
//! cache needs plus two implementations.
//!
//! # Implementations
//! - `InMemoryMemento`: process-local map, used as a test double
//! - `FileMemento`: JSON document on disk, rewritten on every write

mod file;
mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub use file::FileMemento;
pub use memory::InMemoryMemento;

// == Memento Trait ==
/// Durable key/value storage that outlives the in-memory cache.
#[async_trait]
pub trait Memento: Send + Sync {
    /// Returns the value stored under `key`, or `default` if the key was
    /// never written.
    fn read(&self, key: &str, default: Value) -> Result<Value>;

    /// Persists `value` under `key`, replacing any prior value. Resolves once
    /// the store has accepted the write.
    async fn write(&self, key: &str, value: Value) -> Result<()>;

    /// Lists every key known to the store.
    fn list_keys(&self) -> Vec<String>;
}

#[async_trait]
impl<M: Memento + ?Sized> Memento for Arc<M> {
    fn read(&self, key: &str, default: Value) -> Result<Value> {
        (**self).read(key, default)
    }

    async fn write(&self, key: &str, value: Value) -> Result<()> {
        (**self).write(key, value).await
    }

    fn list_keys(&self) -> Vec<String> {
        (**self).list_keys()
    }
}
