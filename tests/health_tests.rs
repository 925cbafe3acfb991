use lumen_rpg::database::health::{HealthMonitor, HealthStatus, HealthThresholds, Transition};
use lumen_rpg::events::{EventBus, Priority};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

fn monitor(events: Option<Arc<EventBus>>) -> HealthMonitor {
    HealthMonitor::new(
        HealthThresholds {
            failure_threshold: 3,
            recovery_threshold: 2,
        },
        events,
    )
}

#[tokio::test]
async fn failures_degrade_then_mark_unhealthy() {
    let m = monitor(None);
    assert_eq!(
        m.record_failure("timeout").await,
        Some(Transition {
            from: HealthStatus::Healthy,
            to: HealthStatus::Degraded
        })
    );
    assert_eq!(m.record_failure("timeout").await, None);
    assert_eq!(
        m.record_failure("timeout").await,
        Some(Transition {
            from: HealthStatus::Degraded,
            to: HealthStatus::Unhealthy
        })
    );
    let snap = m.snapshot().await;
    assert_eq!(snap.consecutive_failures, 3);
    assert_eq!(snap.total_failures, 3);
    assert_eq!(snap.last_error.as_deref(), Some("timeout"));
}

#[tokio::test]
async fn recovery_needs_consecutive_successes() {
    let m = monitor(None);
    for _ in 0..3 {
        m.record_failure("down").await;
    }
    assert_eq!(m.record_success(Duration::from_millis(3)).await, None);
    assert_eq!(m.status().await, HealthStatus::Unhealthy);
    // A failure in between restarts the count.
    m.record_failure("down").await;
    assert_eq!(m.record_success(Duration::from_millis(3)).await, None);
    assert_eq!(
        m.record_success(Duration::from_millis(3)).await,
        Some(Transition {
            from: HealthStatus::Unhealthy,
            to: HealthStatus::Healthy
        })
    );
    let snap = m.snapshot().await;
    assert_eq!(snap.last_error, None);
    assert_eq!(snap.total_checks, 7);
}

#[tokio::test]
async fn transitions_are_published() {
    let bus = Arc::new(EventBus::new());
    let seen = Arc::new(AtomicU32::new(0));
    let counter = seen.clone();
    bus.subscribe_fn("system.db_health", Priority::Normal, "probe", move |_| {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    })
    .await;

    let m = monitor(Some(bus));
    m.record_success(Duration::from_millis(1)).await;
    m.record_failure("x").await;
    m.record_failure("x").await;
    m.record_failure("x").await;
    // Healthy -> Degraded -> Unhealthy.
    assert_eq!(seen.load(Ordering::SeqCst), 2);
}
