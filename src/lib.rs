//! Memento Cache - A key-value cache with per-entry expiration
//!
//! Keeps entries in memory and mirrors every write into a host-provided
//! persistent store (a `Memento`) under a single namespace key.

pub mod cache;
pub mod config;
pub mod error;
pub mod memento;
pub mod tasks;

pub use cache::{CacheEntry, ExpiringCache, DEFAULT_NAMESPACE};
pub use config::Config;
pub use error::{CacheError, Result};
pub use memento::{FileMemento, InMemoryMemento, Memento};
pub use tasks::spawn_cleanup_task;
