//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries and
//! ended rate-limit windows.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

// == Sweep Trait ==
/// A store that can drop its expired entries in one pass.
pub trait Sweep {
    /// Name used in log lines
    const LABEL: &'static str;

    /// Removes expired entries, returning how many were removed.
    fn sweep_expired(&mut self) -> usize;
}

/// Spawns a background task that periodically sweeps expired entries.
///
/// The task sleeps `interval` between passes and holds the write lock only
/// for the duration of one pass. Keep `interval` below the shortest TTL or
/// window in use so stale entries do not linger.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(CacheStore::<String>::new(1000, 300_000)));
/// let handle = spawn_cleanup_task(cache.clone(), Duration::from_secs(60));
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_cleanup_task<T>(target: Arc<RwLock<T>>, interval: Duration) -> JoinHandle<()>
where
    T: Sweep + Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!(
            "Starting {} sweep task with interval of {:?}",
            T::LABEL,
            interval
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut guard = target.write().await;
                guard.sweep_expired()
            };

            if removed > 0 {
                info!("{} sweep: removed {} expired entries", T::LABEL, removed);
            } else {
                debug!("{} sweep: no expired entries found", T::LABEL);
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStore;
    use crate::clock::ManualClock;
    use crate::limiter::{LimitConfig, RateLimiter};

    const TICK: Duration = Duration::from_millis(10);

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_cache_entries() {
        let clock = ManualClock::new(0);
        let cache = Arc::new(RwLock::new(CacheStore::with_clock(100, 300_000, clock.clone())));

        cache
            .write()
            .await
            .set("expire_soon", "value".to_string(), Some(1_000));
        cache
            .write()
            .await
            .set("long_lived", "value".to_string(), Some(3_600_000));

        let handle = spawn_cleanup_task(cache.clone(), TICK);

        clock.advance(1_001);
        tokio::time::sleep(TICK * 10).await;

        {
            let guard = cache.read().await;
            assert_eq!(guard.len(), 1, "expired entry should have been swept");
            assert!(guard.contains_key("long_lived"));
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_removes_ended_windows() {
        let clock = ManualClock::new(0);
        let limiter = Arc::new(RwLock::new(RateLimiter::with_clock(
            LimitConfig::new(500, 5),
            clock.clone(),
        )));

        limiter.write().await.check_default("client");

        let handle = spawn_cleanup_task(limiter.clone(), TICK);

        tokio::time::sleep(TICK * 5).await;
        assert_eq!(limiter.read().await.len(), 1, "window still open");

        clock.advance(501);
        tokio::time::sleep(TICK * 10).await;
        assert!(limiter.read().await.is_empty());

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let cache = Arc::new(RwLock::new(CacheStore::<String>::new(100, 300_000)));

        let handle = spawn_cleanup_task(cache, Duration::from_secs(1));

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
