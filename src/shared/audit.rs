use chrono::{DateTime, Utc};
use serde::Serialize;

/// One administrative mutation, reported to an external sink.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub actor: String,
    pub entity_type: &'static str,
    pub entity_id: String,
    pub action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before_state: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_state: Option<serde_json::Value>,
    pub occurred_at: DateTime<Utc>,
}

impl AuditEvent {
    pub fn new(
        actor: impl Into<String>,
        entity_type: &'static str,
        entity_id: impl ToString,
        action: &'static str,
    ) -> Self {
        Self {
            actor: actor.into(),
            entity_type,
            entity_id: entity_id.to_string(),
            action,
            before_state: None,
            after_state: None,
            occurred_at: Utc::now(),
        }
    }

    pub fn with_before<T: Serialize>(mut self, state: &T) -> Self {
        self.before_state = serde_json::to_value(state).ok();
        self
    }

    pub fn with_after<T: Serialize>(mut self, state: &T) -> Self {
        self.after_state = serde_json::to_value(state).ok();
        self
    }
}

/// External audit sink capability.
///
/// Emission is fire-and-forget: implementations must not block and must
/// swallow their own failures. A failed audit write never fails the
/// business operation that triggered it.
pub trait AuditSink: Send + Sync {
    fn emit(&self, event: AuditEvent);
}

/// Default sink: writes events as structured tracing records under the
/// `audit` target, for collection by the log pipeline.
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn emit(&self, event: AuditEvent) {
        match serde_json::to_string(&event) {
            Ok(payload) => {
                tracing::info!(target: "audit", event = %payload, "audit event emitted")
            }
            Err(e) => {
                tracing::warn!("Failed to serialize audit event: {}", e);
            }
        }
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Test sink that records every event it receives.
    #[derive(Default)]
    pub struct RecordingAuditSink {
        pub events: Mutex<Vec<AuditEvent>>,
    }

    impl AuditSink for RecordingAuditSink {
        fn emit(&self, event: AuditEvent) {
            self.events.lock().unwrap().push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingAuditSink;
    use super::*;

    #[test]
    fn test_event_builder_attaches_states() {
        let event = AuditEvent::new("admin", "characteristic", "42", "create")
            .with_after(&serde_json::json!({"key": "cpu"}));

        assert_eq!(event.actor, "admin");
        assert_eq!(event.entity_type, "characteristic");
        assert!(event.before_state.is_none());
        assert_eq!(
            event.after_state.as_ref().and_then(|s| s.get("key")),
            Some(&serde_json::json!("cpu"))
        );
    }

    #[test]
    fn test_recording_sink_collects_events() {
        let sink = RecordingAuditSink::default();

        sink.emit(AuditEvent::new("admin", "category", "a", "delete"));
        sink.emit(AuditEvent::new("admin", "category", "b", "delete"));

        let events = sink.events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].entity_id, "b");
    }
}
