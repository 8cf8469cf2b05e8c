use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

use super::AuditEvent;

/// Envelope wrapping an audit event with metadata
#[derive(Debug, Clone)]
pub struct AuditEventEnvelope {
    pub timestamp: DateTime<Utc>,
    pub event: AuditEvent,
}

/// Handle for emitting audit events
///
/// This is cheaply cloneable and can be shared across tasks.
/// Events are sent through a bounded channel to be written by the AuditWriter.
#[derive(Debug, Clone)]
pub struct AuditHandle {
    tx: mpsc::Sender<AuditEventEnvelope>,
}

impl AuditHandle {
    /// Create a new audit handle from a channel sender
    pub fn new(tx: mpsc::Sender<AuditEventEnvelope>) -> Self {
        Self { tx }
    }

    /// Emit an audit event, waiting for channel capacity
    ///
    /// If the channel is closed, the error is logged but the caller is not failed.
    pub async fn emit(&self, event: AuditEvent) {
        let envelope = AuditEventEnvelope {
            timestamp: Utc::now(),
            event,
        };
        if let Err(e) = self.tx.send(envelope).await {
            tracing::error!("Failed to emit audit event: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_emit_event() {
        let (tx, mut rx) = mpsc::channel(10);
        let handle = AuditHandle::new(tx);

        handle
            .emit(AuditEvent::ServiceStarted {
                version: "0.1.0".to_string(),
                config_hash: "abc123".to_string(),
            })
            .await;

        let envelope = rx.recv().await.expect("Should receive event");
        assert!(matches!(envelope.event, AuditEvent::ServiceStarted { .. }));
    }

    #[tokio::test]
    async fn test_emit_waits_for_capacity() {
        let (tx, mut rx) = mpsc::channel(1);
        let handle = AuditHandle::new(tx);

        handle.emit(AuditEvent::BotAdded { bot_id: 1 }).await;

        // Channel is full until the reader makes room
        let sender = handle.clone();
        let pending = tokio::spawn(async move {
            sender.emit(AuditEvent::BotAdded { bot_id: 2 }).await;
        });
        tokio::task::yield_now().await;
        assert!(!pending.is_finished());

        assert_eq!(rx.recv().await.unwrap().event, AuditEvent::BotAdded { bot_id: 1 });
        pending.await.unwrap();
        assert_eq!(rx.recv().await.unwrap().event, AuditEvent::BotAdded { bot_id: 2 });
    }

    #[tokio::test]
    async fn test_emit_closed_channel() {
        let (tx, rx) = mpsc::channel::<AuditEventEnvelope>(10);
        let handle = AuditHandle::new(tx);
        drop(rx);

        // Logged, not propagated
        handle
            .emit(AuditEvent::ServiceStopped {
                reason: "test".to_string(),
            })
            .await;
    }

    #[tokio::test]
    async fn test_envelope_has_timestamp() {
        let (tx, mut rx) = mpsc::channel(10);
        let handle = AuditHandle::new(tx);

        let before = Utc::now();
        handle.emit(AuditEvent::BotAdded { bot_id: 1 }).await;
        let after = Utc::now();

        let envelope = rx.try_recv().expect("Should receive event");
        assert!(envelope.timestamp >= before);
        assert!(envelope.timestamp <= after);
    }
}
