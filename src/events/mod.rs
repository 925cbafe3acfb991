//! In-process publish/subscribe dispatcher.
//!
//! Listeners subscribe to an exact topic (`fusion.completed`) or a wildcard pattern
//! (`fusion.*`, `*`). Publishing runs every matching listener sequentially, ordered by
//! [`Priority`] and then by subscription order. A failing listener is logged and skipped;
//! it never prevents the remaining listeners from running.

pub mod listeners;

use ahash::AHashMap;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Dispatch order; `Critical` runs first, `Monitor` last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Critical,
    High,
    Normal,
    Low,
    Monitor,
}

#[derive(Debug, Clone)]
pub struct Event {
    pub topic: String,
    pub payload: Value,
    pub emitted_at: DateTime<Utc>,
}

impl Event {
    pub fn new(topic: impl Into<String>, payload: Value) -> Self {
        Self {
            topic: topic.into(),
            payload,
            emitted_at: Utc::now(),
        }
    }
}

#[async_trait]
pub trait Listener: Send + Sync {
    async fn handle(&self, event: &Event) -> anyhow::Result<()>;
}

/// Adapts an async closure into a [`Listener`].
pub struct FnListener<F>(pub F);

#[async_trait]
impl<F, Fut> Listener for FnListener<F>
where
    F: Fn(Event) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    async fn handle(&self, event: &Event) -> anyhow::Result<()> {
        (self.0)(event.clone()).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Clone)]
struct Subscription {
    id: SubscriptionId,
    name: String,
    pattern: String,
    priority: Priority,
    listener: Arc<dyn Listener>,
}

#[derive(Default)]
struct Registry {
    exact: AHashMap<String, Vec<Subscription>>,
    wildcard: Vec<Subscription>,
}

/// Outcome of a single `publish` call.
#[derive(Debug, Clone, Default)]
pub struct PublishReport {
    pub delivered: usize,
    pub failed: Vec<String>,
}

pub struct EventBus {
    registry: RwLock<Registry>,
    next_id: AtomicU64,
    published: AtomicU64,
    failures: AtomicU64,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            registry: RwLock::new(Registry::default()),
            next_id: AtomicU64::new(1),
            published: AtomicU64::new(0),
            failures: AtomicU64::new(0),
        }
    }

    pub async fn subscribe(
        &self,
        pattern: &str,
        priority: Priority,
        name: &str,
        listener: Arc<dyn Listener>,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let sub = Subscription {
            id,
            name: name.to_string(),
            pattern: pattern.to_string(),
            priority,
            listener,
        };
        let mut reg = self.registry.write().await;
        if pattern.contains('*') {
            reg.wildcard.push(sub);
        } else {
            reg.exact.entry(pattern.to_string()).or_default().push(sub);
        }
        debug!(target = "events", pattern, listener = name, ?priority, "listener subscribed");
        id
    }

    /// Convenience wrapper for closure listeners.
    pub async fn subscribe_fn<F, Fut>(
        &self,
        pattern: &str,
        priority: Priority,
        name: &str,
        f: F,
    ) -> SubscriptionId
    where
        F: Fn(Event) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.subscribe(pattern, priority, name, Arc::new(FnListener(f)))
            .await
    }

    /// Removes a listener. Returns false when the id was unknown.
    pub async fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut reg = self.registry.write().await;
        let before = reg.wildcard.len();
        reg.wildcard.retain(|s| s.id != id);
        if reg.wildcard.len() != before {
            return true;
        }
        let mut removed = false;
        reg.exact.retain(|_, subs| {
            let len = subs.len();
            subs.retain(|s| s.id != id);
            removed |= subs.len() != len;
            !subs.is_empty()
        });
        removed
    }

    async fn matching(&self, topic: &str) -> Vec<Subscription> {
        let reg = self.registry.read().await;
        let mut subs: Vec<Subscription> = reg.exact.get(topic).cloned().unwrap_or_default();
        subs.extend(
            reg.wildcard
                .iter()
                .filter(|s| pattern_matches(&s.pattern, topic))
                .cloned(),
        );
        // Ids increase with subscription order, so this is (priority, registration).
        subs.sort_by_key(|s| (s.priority, s.id.0));
        subs
    }

    pub async fn listener_count(&self, topic: &str) -> usize {
        self.matching(topic).await.len()
    }

    pub async fn publish(&self, event: Event) -> PublishReport {
        self.published.fetch_add(1, Ordering::Relaxed);
        let subs = self.matching(&event.topic).await;
        let mut report = PublishReport::default();
        for sub in subs {
            match sub.listener.handle(&event).await {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    self.failures.fetch_add(1, Ordering::Relaxed);
                    warn!(target = "events", topic = %event.topic, listener = %sub.name, error = %e, "listener failed");
                    report.failed.push(sub.name);
                }
            }
        }
        report
    }

    /// Shorthand for `publish(Event::new(topic, payload))`.
    pub async fn emit(&self, topic: &str, payload: Value) -> PublishReport {
        self.publish(Event::new(topic, payload)).await
    }

    /// (events published, listener failures) since startup.
    pub fn stats(&self) -> (u64, u64) {
        (
            self.published.load(Ordering::Relaxed),
            self.failures.load(Ordering::Relaxed),
        )
    }
}

/// Glob match where `*` matches any run of characters (dots included).
pub fn pattern_matches(pattern: &str, topic: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let t: Vec<char> = topic.chars().collect();
    let (mut pi, mut ti) = (0, 0);
    let mut star: Option<usize> = None;
    let mut mark = 0;
    while ti < t.len() {
        if pi < p.len() && p[pi] != '*' && p[pi] == t[ti] {
            pi += 1;
            ti += 1;
        } else if pi < p.len() && p[pi] == '*' {
            star = Some(pi);
            mark = ti;
            pi += 1;
        } else if let Some(s) = star {
            pi = s + 1;
            mark += 1;
            ti = mark;
        } else {
            return false;
        }
    }
    while pi < p.len() && p[pi] == '*' {
        pi += 1;
    }
    pi == p.len()
}
