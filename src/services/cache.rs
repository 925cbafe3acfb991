//! Read-through helpers for the small per-process caches held in `AppState`.
//! Entries are `(stored_at, value)` pairs; anything older than the TTL counts as absent.
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

static HITS: AtomicU64 = AtomicU64::new(0);
static MISSES: AtomicU64 = AtomicU64::new(0);

/// (hits, misses) across every cache since startup.
pub fn cache_stats() -> (u64, u64) {
    (HITS.load(Ordering::Relaxed), MISSES.load(Ordering::Relaxed))
}

/// Returns a clone of a fresh entry. Stale entries are dropped on the way out.
pub async fn get_with_ttl<K, V>(
    map: &RwLock<HashMap<K, (Instant, V)>>,
    key: &K,
    ttl: Duration,
) -> Option<V>
where
    K: Eq + Hash,
    V: Clone,
{
    let lookup = map
        .read()
        .await
        .get(key)
        .map(|(stored_at, value)| (stored_at.elapsed() < ttl, value.clone()));
    match lookup {
        Some((true, value)) => {
            HITS.fetch_add(1, Ordering::Relaxed);
            Some(value)
        }
        Some((false, _)) => {
            let mut map = map.write().await;
            // Another task may have refreshed it between the two locks.
            if map.get(key).is_some_and(|(at, _)| at.elapsed() >= ttl) {
                map.remove(key);
            }
            MISSES.fetch_add(1, Ordering::Relaxed);
            None
        }
        None => {
            MISSES.fetch_add(1, Ordering::Relaxed);
            None
        }
    }
}

pub async fn insert<K, V>(map: &RwLock<HashMap<K, (Instant, V)>>, key: K, value: V)
where
    K: Eq + Hash,
{
    map.write().await.insert(key, (Instant::now(), value));
}
