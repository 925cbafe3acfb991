//! In-process cache of tunable game-balance values.
//!
//! `ConfigManager` is a read-through cache over a [`ConfigStore`] (the `game_config`
//! table in production). Reads past the TTL reload the whole table; a background task
//! also refreshes on a timer. A failed reload keeps serving the previous snapshot.

pub mod sections;

use crate::error::{RpgError, RpgResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub use sections::ConfigSection;

/// Backing storage for config blobs.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn load_all(&self) -> RpgResult<HashMap<String, Value>>;
    async fn save(&self, key: &str, value: &Value) -> RpgResult<()>;
}

/// Store used by tests and by tools that run without a database.
#[derive(Default)]
pub struct MemoryConfigStore {
    values: RwLock<HashMap<String, Value>>,
    fail_loads: std::sync::atomic::AtomicBool,
}

impl MemoryConfigStore {
    pub fn with_values(values: HashMap<String, Value>) -> Self {
        Self {
            values: RwLock::new(values),
            fail_loads: Default::default(),
        }
    }

    /// Makes subsequent `load_all` calls fail, simulating a database outage.
    pub fn set_failing(&self, failing: bool) {
        self.fail_loads
            .store(failing, std::sync::atomic::Ordering::SeqCst);
    }

    pub async fn put(&self, key: &str, value: Value) {
        self.values.write().await.insert(key.to_string(), value);
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn load_all(&self) -> RpgResult<HashMap<String, Value>> {
        if self.fail_loads.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(RpgError::Internal("config store unavailable".into()));
        }
        Ok(self.values.read().await.clone())
    }

    async fn save(&self, key: &str, value: &Value) -> RpgResult<()> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.clone());
        Ok(())
    }
}

#[derive(Default)]
struct Snapshot {
    values: HashMap<String, Value>,
    loaded_at: Option<Instant>,
}

pub struct ConfigManager {
    store: Arc<dyn ConfigStore>,
    defaults: Value,
    ttl: Duration,
    cache: RwLock<Snapshot>,
}

impl ConfigManager {
    pub fn new(store: Arc<dyn ConfigStore>, ttl: Duration) -> Self {
        Self {
            store,
            defaults: sections::defaults_document(),
            ttl,
            cache: RwLock::new(Snapshot::default()),
        }
    }

    /// Reloads every key from the store. Returns the number of keys loaded.
    pub async fn refresh(&self) -> RpgResult<usize> {
        let values = self.store.load_all().await?;
        let count = values.len();
        let mut cache = self.cache.write().await;
        cache.values = values;
        cache.loaded_at = Some(Instant::now());
        debug!(target = "config", keys = count, "config snapshot reloaded");
        Ok(count)
    }

    /// Marks the snapshot stale so the next read reloads it.
    pub async fn invalidate(&self) {
        self.cache.write().await.loaded_at = None;
    }

    async fn ensure_fresh(&self) {
        let stale = match self.cache.read().await.loaded_at {
            Some(at) => at.elapsed() >= self.ttl,
            None => true,
        };
        if stale && let Err(e) = self.refresh().await {
            warn!(target = "config", error = %e, "config reload failed; serving previous snapshot");
            // Back off until the next TTL window instead of hammering the store on every read.
            self.cache.write().await.loaded_at = Some(Instant::now());
        }
    }

    /// Looks up a dot path (`fusion.rates.3`). Stored values are layered over the
    /// hardcoded defaults, so a bare section key returns the whole effective section.
    pub async fn get_value(&self, path: &str) -> Option<Value> {
        self.ensure_fresh().await;
        let (head, rest) = split_path(path);
        let root = self.effective(head).await?;
        lookup_path(&root, rest).cloned()
    }

    /// Defaults for `head` with the stored blob merged on top.
    async fn effective(&self, head: &str) -> Option<Value> {
        let cache = self.cache.read().await;
        match (self.defaults.get(head), cache.values.get(head)) {
            (Some(default), Some(stored)) => {
                let mut merged = default.clone();
                overlay(&mut merged, stored);
                Some(merged)
            }
            (default, stored) => stored.or(default).cloned(),
        }
    }

    /// Typed lookup; `fallback` is returned when the path is absent or has the wrong shape.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, fallback: T) -> T {
        match self.get_value(path).await {
            Some(v) => serde_json::from_value(v).unwrap_or_else(|e| {
                warn!(target = "config", path, error = %e, "config value has unexpected type");
                fallback
            }),
            None => fallback,
        }
    }

    /// Loads a whole balance section. Stored fields override defaults field by field.
    pub async fn section<T: ConfigSection>(&self) -> T {
        self.ensure_fresh().await;
        let stored = self.cache.read().await.values.get(T::KEY).cloned();
        match stored {
            Some(v) => serde_json::from_value(v).unwrap_or_else(|e| {
                warn!(target = "config", key = T::KEY, error = %e, "invalid config section; using defaults");
                T::default()
            }),
            None => T::default(),
        }
    }

    /// Writes a value at a dot path through to the store and updates the cache.
    /// Values that would break the typed section are rejected before anything is saved.
    pub async fn set(&self, path: &str, value: Value) -> RpgResult<()> {
        let (head, rest) = split_path(path);
        if head.is_empty() {
            return Err(RpgError::validation("Config path cannot be empty."));
        }
        self.ensure_fresh().await;
        let current = self.effective(head).await;
        let updated = match rest {
            None => value,
            Some(rest) => {
                let mut root = current.unwrap_or_else(|| Value::Object(Default::default()));
                set_path(&mut root, rest, value)?;
                root
            }
        };
        sections::validate_section(head, &updated).map_err(|e| {
            RpgError::validation(format!("`{path}` does not fit the `{head}` section: {e}"))
        })?;
        self.store.save(head, &updated).await?;
        self.cache
            .write()
            .await
            .values
            .insert(head.to_string(), updated);
        info!(target = "config", path, "config value updated");
        Ok(())
    }

    /// Keys currently held in the snapshot (stored keys, not defaults).
    pub async fn keys(&self) -> Vec<String> {
        self.ensure_fresh().await;
        let mut keys: Vec<String> = self.cache.read().await.values.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Spawns the periodic refresh loop.
    pub fn spawn_refresh(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            // The first tick fires immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if let Err(e) = self.refresh().await {
                    warn!(target = "config", error = %e, "scheduled config refresh failed");
                }
            }
        })
    }
}

fn split_path(path: &str) -> (&str, Option<&str>) {
    match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    }
}

fn lookup_path<'a>(root: &'a Value, rest: Option<&str>) -> Option<&'a Value> {
    let Some(rest) = rest else {
        return Some(root);
    };
    rest.split('.').try_fold(root, |node, segment| match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Deep-merges `top` into `base`; objects merge key by key, anything else replaces.
fn overlay(base: &mut Value, top: &Value) {
    match (base, top) {
        (Value::Object(base), Value::Object(top)) => {
            for (key, value) in top {
                match base.get_mut(key) {
                    Some(existing) => overlay(existing, value),
                    None => {
                        base.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base, top) => *base = top.clone(),
    }
}

fn set_path(root: &mut Value, rest: &str, value: Value) -> RpgResult<()> {
    let segments: Vec<&str> = rest.split('.').collect();
    let mut node = root;
    for (i, segment) in segments.iter().enumerate() {
        let last = i == segments.len() - 1;
        node = match node {
            Value::Object(map) => {
                if last {
                    map.insert(segment.to_string(), value);
                    return Ok(());
                }
                map.entry(segment.to_string())
                    .or_insert_with(|| Value::Object(Default::default()))
            }
            Value::Array(items) => {
                let idx = segment
                    .parse::<usize>()
                    .ok()
                    .filter(|i| *i < items.len())
                    .ok_or_else(|| {
                        RpgError::validation(format!("Index `{segment}` is out of range."))
                    })?;
                if last {
                    items[idx] = value;
                    return Ok(());
                }
                &mut items[idx]
            }
            _ => {
                return Err(RpgError::validation(format!(
                    "Cannot descend into `{segment}`: parent is not an object or list."
                )));
            }
        };
    }
    Ok(())
}
