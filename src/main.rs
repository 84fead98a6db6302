//! TTL LRU demo
//!
//! Drives a cache through a short recency and expiry workload and prints the
//! resulting statistics as JSON.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{ensure, Context};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ttl_lru::{spawn_sweep_task, Config, ManualClock, TtlLruCache};

/// Entry point for the demo.
///
/// # Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache and, if configured, its sweep task
/// 4. Run the recency workload on the system clock
/// 5. Run the expiry workload on a manual clock
/// 6. Print stats and stop the sweep task
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ttl_lru=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: max_entries={}, default_ttl={}s, cleanup_interval={}s",
        config.max_entries, config.default_ttl, config.cleanup_interval
    );

    let cache = Arc::new(
        TtlLruCache::<String, u64>::from_config(&config).context("Failed to create cache")?,
    );
    let sweep_handle = config
        .sweep_interval()
        .map(|interval| spawn_sweep_task(cache.clone(), interval));

    run_recency_workload(&cache, &config)?;
    run_expiry_workload()?;

    let stats = cache.stats();
    println!(
        "{}",
        serde_json::to_string_pretty(&stats).context("Failed to serialize stats")?
    );

    if let Some(handle) = sweep_handle {
        handle.abort();
        info!("Sweep task aborted");
    }

    Ok(())
}

/// Fills the cache one past capacity after touching the oldest key, then
/// checks that the second-oldest key was the one evicted.
fn run_recency_workload(
    cache: &TtlLruCache<String, u64>,
    config: &Config,
) -> anyhow::Result<()> {
    let ttl = config.default_ttl();
    let capacity = cache.capacity() as u64;

    for i in 0..capacity {
        cache.put(format!("key{i}"), i, ttl)?;
    }
    ensure!(cache.get("key0") == Some(0), "key0 should be cached");

    cache.put(format!("key{capacity}"), capacity, ttl)?;

    if capacity > 1 {
        ensure!(cache.get("key1").is_none(), "key1 should have been evicted");
        ensure!(cache.get("key0").is_some(), "key0 should survive eviction");
    } else {
        ensure!(cache.get("key0").is_none(), "key0 should have been evicted");
    }

    info!(entries = cache.len(), "Recency workload complete");
    Ok(())
}

/// Advances a manual clock past one entry's TTL but not another's.
fn run_expiry_workload() -> anyhow::Result<()> {
    let clock = ManualClock::new();
    let cache = TtlLruCache::with_clock(2, clock.clone())?;

    cache.put(1, 100, Duration::from_millis(5000))?;
    cache.put(2, 200, Duration::from_millis(10000))?;
    ensure!(cache.get(&1) == Some(100), "key 1 should be live");

    clock.advance(Duration::from_millis(6000));

    ensure!(cache.get(&1).is_none(), "key 1 should have expired");
    ensure!(cache.get(&2) == Some(200), "key 2 should still be live");

    info!(stats = ?cache.stats(), "Expiry workload complete");
    Ok(())
}
