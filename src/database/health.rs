//! Poll-loop database health checker with consecutive failure/recovery thresholds.

use crate::events::EventBus;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Degraded => "degraded",
            HealthStatus::Unhealthy => "unhealthy",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HealthThresholds {
    pub failure_threshold: u32,
    pub recovery_threshold: u32,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            failure_threshold: 3,
            recovery_threshold: 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HealthSnapshot {
    pub status: HealthStatus,
    pub consecutive_failures: u32,
    pub consecutive_successes: u32,
    pub total_checks: u64,
    pub total_failures: u64,
    pub last_check: Option<DateTime<Utc>>,
    pub last_latency: Option<Duration>,
    pub last_error: Option<String>,
}

impl Default for HealthSnapshot {
    fn default() -> Self {
        Self {
            status: HealthStatus::Healthy,
            consecutive_failures: 0,
            consecutive_successes: 0,
            total_checks: 0,
            total_failures: 0,
            last_check: None,
            last_latency: None,
            last_error: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: HealthStatus,
    pub to: HealthStatus,
}

pub struct HealthMonitor {
    thresholds: HealthThresholds,
    state: RwLock<HealthSnapshot>,
    events: Option<Arc<EventBus>>,
}

impl HealthMonitor {
    pub fn new(thresholds: HealthThresholds, events: Option<Arc<EventBus>>) -> Self {
        Self {
            thresholds,
            state: RwLock::new(HealthSnapshot::default()),
            events,
        }
    }

    pub async fn snapshot(&self) -> HealthSnapshot {
        self.state.read().await.clone()
    }

    pub async fn status(&self) -> HealthStatus {
        self.state.read().await.status
    }

    /// Records a successful probe. Returns the status change, if any.
    pub async fn record_success(&self, latency: Duration) -> Option<Transition> {
        let transition = {
            let mut s = self.state.write().await;
            s.total_checks += 1;
            s.last_check = Some(Utc::now());
            s.last_latency = Some(latency);
            s.consecutive_failures = 0;
            s.consecutive_successes += 1;
            let from = s.status;
            if from != HealthStatus::Healthy
                && s.consecutive_successes >= self.thresholds.recovery_threshold
            {
                s.status = HealthStatus::Healthy;
                s.last_error = None;
            }
            (from != s.status).then_some(Transition { from, to: s.status })
        };
        self.announce(transition).await;
        transition
    }

    /// Records a failed probe. Returns the status change, if any.
    pub async fn record_failure(&self, err: &str) -> Option<Transition> {
        let transition = {
            let mut s = self.state.write().await;
            s.total_checks += 1;
            s.total_failures += 1;
            s.last_check = Some(Utc::now());
            s.last_error = Some(err.to_string());
            s.consecutive_successes = 0;
            s.consecutive_failures += 1;
            let from = s.status;
            s.status = if s.consecutive_failures >= self.thresholds.failure_threshold
                || from == HealthStatus::Unhealthy
            {
                HealthStatus::Unhealthy
            } else {
                HealthStatus::Degraded
            };
            (from != s.status).then_some(Transition { from, to: s.status })
        };
        self.announce(transition).await;
        transition
    }

    async fn announce(&self, transition: Option<Transition>) {
        let Some(t) = transition else {
            return;
        };
        match t.to {
            HealthStatus::Healthy => {
                info!(target = "db.health", from = t.from.as_str(), "database recovered")
            }
            HealthStatus::Degraded => {
                warn!(target = "db.health", from = t.from.as_str(), "database degraded")
            }
            HealthStatus::Unhealthy => {
                error!(target = "db.health", from = t.from.as_str(), "database unhealthy")
            }
        }
        if let Some(bus) = &self.events {
            bus.emit(
                "system.db_health",
                json!({ "from": t.from.as_str(), "to": t.to.as_str() }),
            )
            .await;
        }
    }

    /// Runs one `SELECT 1` probe against the pool.
    pub async fn check(&self, pool: &PgPool) -> Option<Transition> {
        let started = Instant::now();
        match sqlx::query("SELECT 1").execute(pool).await {
            Ok(_) => self.record_success(started.elapsed()).await,
            Err(e) => self.record_failure(&e.to_string()).await,
        }
    }

    pub fn spawn(self: Arc<Self>, pool: PgPool, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                self.check(&pool).await;
            }
        })
    }
}
