//! Expiration Cleanup Task
//!
//! Background task that periodically purges expired cache entries and
//! persists the trimmed mapping.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::ExpiringCache;
use crate::memento::Memento;

/// Spawns a background task that periodically purges expired cache entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between runs. It acquires a write lock on the cache for each purge.
/// Reads through `get` already skip expired entries, so this only reclaims
/// space in the mapping and in the persisted snapshot.
///
/// # Arguments
/// * `cache` - Shared reference to the cache
/// * `cleanup_interval_secs` - Interval in seconds between runs
///
/// # Returns
/// A JoinHandle for the spawned task, used to abort it on shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(ExpiringCache::new(store, None)?));
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), 60);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task<M>(
    cache: Arc<RwLock<ExpiringCache<M>>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()>
where
    M: Memento + 'static,
{
    let interval = cleanup_interval(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting expiration cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let result = {
                let mut cache_guard = cache.write().await;
                cache_guard.purge_expired().await
            };

            match result {
                Ok(0) => debug!("Expiration cleanup: no expired entries found"),
                Ok(removed) => info!("Expiration cleanup: removed {} expired entries", removed),
                Err(e) => warn!("Expiration cleanup: failed to persist purge: {}", e),
            }
        }
    })
}

/// Interval between runs; never shorter than one second.
fn cleanup_interval(secs: u64) -> Duration {
    Duration::from_secs(secs.max(1))
}
