//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with expiration support.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// == Cache Entry ==
/// Represents a single cache entry: a JSON value and an optional absolute
/// expiration timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The stored value
    pub value: Value,
    /// Expiration timestamp (Unix seconds), None = no expiration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<i64>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry that expires `expiration_secs` seconds from now.
    ///
    /// `None` and `Some(0)` both produce an entry that never expires. There is
    /// no way to request an entry that is already expired.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `expiration_secs` - Optional lifetime in seconds
    pub fn new(value: Value, expiration_secs: Option<u64>) -> Self {
        let expiration = expiration_secs
            .filter(|secs| *secs > 0)
            .map(|secs| {
                let secs = i64::try_from(secs).unwrap_or(i64::MAX);
                current_timestamp().saturating_add(secs)
            });

        Self { value, expiration }
    }

    /// Creates an entry with an explicit absolute expiration.
    pub fn with_expiration(value: Value, expiration: Option<i64>) -> Self {
        Self { value, expiration }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired as soon as the current second
    /// reaches the expiration timestamp.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp())
    }

    /// Expiration check against a caller-supplied timestamp.
    pub fn is_expired_at(&self, now: i64) -> bool {
        match self.expiration {
            Some(expiration) => now >= expiration,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns remaining lifetime in seconds, or None if no expiration is set.
    ///
    /// # Returns
    /// - `Some(0)` if the entry has expired
    /// - `Some(remaining)` if the entry has an expiration that hasn't passed
    /// - `None` if the entry never expires
    pub fn ttl_remaining(&self) -> Option<u64> {
        self.ttl_remaining_at(current_timestamp())
    }

    /// Remaining lifetime measured from a caller-supplied timestamp.
    pub fn ttl_remaining_at(&self, now: i64) -> Option<u64> {
        self.expiration.map(|expiration| {
            let remaining = expiration.saturating_sub(now);
            u64::try_from(remaining).unwrap_or(0)
        })
    }
}

// == Utility Functions ==
/// Returns the current Unix timestamp in whole seconds.
pub fn current_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}
