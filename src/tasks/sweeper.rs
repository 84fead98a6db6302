//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries. It only
//! reclaims memory early; `get` and `put` behave the same with or without it.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{Clock, TtlLruCache};

/// Spawns a background task that calls [`TtlLruCache::purge_expired`] every `interval`.
///
/// Must be called from within a Tokio runtime. The returned handle can be
/// aborted to stop the sweep.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(TtlLruCache::new(1000)?);
/// let sweep_handle = spawn_sweep_task(cache.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task<K, V, C>(
    cache: Arc<TtlLruCache<K, V, C>>,
    interval: Duration,
) -> JoinHandle<()>
where
    K: Hash + Eq + Clone + Send + 'static,
    V: Clone + Send + 'static,
    C: Clock + 'static,
{
    tokio::spawn(async move {
        info!(
            interval_ms = interval.as_millis() as u64,
            "Starting expiry sweep task"
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.purge_expired();

            if removed > 0 {
                info!("Expiry sweep: removed {} expired entries", removed);
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    })
}
