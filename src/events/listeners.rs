//! Built-in listeners registered at startup.

use super::{Event, EventBus, Listener, Priority};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Logs every event at `Monitor` priority so it sees the final state of a dispatch.
pub struct AuditLogListener;

#[async_trait]
impl Listener for AuditLogListener {
    async fn handle(&self, event: &Event) -> anyhow::Result<()> {
        info!(
            target = "events.audit",
            topic = %event.topic,
            payload = %event.payload,
            at = %event.emitted_at,
            "event"
        );
        Ok(())
    }
}

pub async fn register_defaults(bus: &EventBus) {
    bus.subscribe("*", Priority::Monitor, "audit_log", Arc::new(AuditLogListener))
        .await;
}
