use lumen_rpg::events::{Event, EventBus, Priority, pattern_matches};
use serde_json::json;
use std::sync::{Arc, Mutex};

type Log = Arc<Mutex<Vec<&'static str>>>;

async fn ignore(_: Event) -> anyhow::Result<()> {
    Ok(())
}

async fn explode(_: Event) -> anyhow::Result<()> {
    Err(anyhow::anyhow!("boom"))
}

async fn record(bus: &EventBus, pattern: &str, priority: Priority, name: &'static str, log: &Log) {
    let log = log.clone();
    bus.subscribe_fn(pattern, priority, name, move |_| {
        let log = log.clone();
        async move {
            log.lock().unwrap().push(name);
            Ok(())
        }
    })
    .await;
}

#[test]
fn wildcard_patterns() {
    assert!(pattern_matches("*", "fusion.completed"));
    assert!(pattern_matches("fusion.*", "fusion.completed"));
    assert!(pattern_matches("*.completed", "fusion.completed"));
    assert!(pattern_matches("fusion.completed", "fusion.completed"));
    assert!(!pattern_matches("fusion.*", "gacha.summoned"));
    assert!(!pattern_matches("fusion", "fusion.completed"));
}

#[tokio::test]
async fn listeners_run_by_priority_then_subscription_order() {
    let bus = EventBus::new();
    let log: Log = Arc::default();
    record(&bus, "fusion.completed", Priority::Low, "low", &log).await;
    record(&bus, "*", Priority::Monitor, "audit", &log).await;
    record(&bus, "fusion.*", Priority::Critical, "critical", &log).await;
    record(&bus, "fusion.completed", Priority::Normal, "normal_a", &log).await;
    record(&bus, "fusion.completed", Priority::Normal, "normal_b", &log).await;

    let report = bus.emit("fusion.completed", json!({ "tier": 3 })).await;
    assert_eq!(report.delivered, 5);
    assert!(report.failed.is_empty());
    assert_eq!(
        *log.lock().unwrap(),
        vec!["critical", "normal_a", "normal_b", "low", "audit"]
    );
}

#[tokio::test]
async fn a_failing_listener_does_not_stop_the_rest() {
    let bus = EventBus::new();
    let log: Log = Arc::default();
    bus.subscribe_fn("gacha.summoned", Priority::High, "broken", explode)
        .await;
    record(&bus, "gacha.summoned", Priority::Normal, "after", &log).await;

    let report = bus.emit("gacha.summoned", json!({})).await;
    assert_eq!(report.delivered, 1);
    assert_eq!(report.failed, vec!["broken".to_string()]);
    assert_eq!(*log.lock().unwrap(), vec!["after"]);
    assert_eq!(bus.stats(), (1, 1));
}

#[tokio::test]
async fn unsubscribe_removes_exact_and_wildcard_listeners() {
    let bus = EventBus::new();
    let log: Log = Arc::default();
    let exact = bus
        .subscribe_fn("daily.claimed", Priority::Normal, "exact", ignore)
        .await;
    let wild = bus
        .subscribe_fn("daily.*", Priority::Normal, "wild", ignore)
        .await;
    record(&bus, "other.topic", Priority::Normal, "unrelated", &log).await;
    assert_eq!(bus.listener_count("daily.claimed").await, 2);

    assert!(bus.unsubscribe(exact).await);
    assert!(!bus.unsubscribe(exact).await);
    assert!(bus.unsubscribe(wild).await);
    assert_eq!(bus.listener_count("daily.claimed").await, 0);

    let report = bus.emit("daily.claimed", json!({})).await;
    assert_eq!(report.delivered, 0);
    assert!(log.lock().unwrap().is_empty());
}
