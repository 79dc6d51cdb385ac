//! Cache Module
//!
//! Provides an in-memory entry mapping with per-entry expiration, mirrored
//! into a persistent store.

mod entry;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{current_timestamp, CacheEntry};
pub use store::ExpiringCache;

// == Public Constants ==
/// Namespace used when none is supplied at construction
pub const DEFAULT_NAMESPACE: &str = "cache";
