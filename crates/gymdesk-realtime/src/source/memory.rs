//! In-memory push source for single-process deployments and tests.

use async_trait::async_trait;
use tokio::sync::{broadcast, mpsc};
use tracing::warn;

use gymdesk_core::events::ScheduleEvent;
use gymdesk_core::result::AppResult;
use gymdesk_core::traits::push::{PushFrame, PushSource};

/// In-memory push hub over a broadcast channel.
///
/// A subscriber that falls behind receives a [`PushFrame::Reconnected`]
/// instead of the skipped events, which forces the same unconditional
/// refresh a transport reconnect would — missed events never go silently.
#[derive(Debug, Clone)]
pub struct MemoryPushHub {
    /// Event fan-out.
    tx: broadcast::Sender<ScheduleEvent>,
}

impl MemoryPushHub {
    /// Create a standalone hub.
    pub fn new(buffer_size: usize) -> Self {
        let (tx, _) = broadcast::channel(buffer_size.max(1));
        Self { tx }
    }

    /// Attach a hub to an existing event channel (e.g. the in-memory
    /// gateway's).
    pub fn attached(tx: broadcast::Sender<ScheduleEvent>) -> Self {
        Self { tx }
    }

    /// Publish an event to all subscribers.
    pub fn publish(&self, event: ScheduleEvent) {
        let _ = self.tx.send(event);
    }

    /// Handle for publishing from elsewhere.
    pub fn sender(&self) -> broadcast::Sender<ScheduleEvent> {
        self.tx.clone()
    }
}

#[async_trait]
impl PushSource for MemoryPushHub {
    async fn subscribe(&self) -> AppResult<mpsc::Receiver<PushFrame>> {
        let mut events = self.tx.subscribe();
        let (tx, rx) = mpsc::channel(64);

        tokio::spawn(async move {
            if tx.send(PushFrame::Reconnected).await.is_err() {
                return;
            }
            loop {
                match events.recv().await {
                    Ok(event) => {
                        if tx.send(PushFrame::Event(event)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Push subscriber lagged, degrading to refresh");
                        if tx.send(PushFrame::Reconnected).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        Ok(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use gymdesk_core::types::id::{MemberId, SessionId, TrainerId};

    fn created_event(trainer_id: TrainerId) -> ScheduleEvent {
        ScheduleEvent::SessionCreated {
            session_id: SessionId::new(),
            trainer_id,
            member_id: MemberId::new(),
            starts_at: Utc::now(),
            duration_minutes: 60,
        }
    }

    #[tokio::test]
    async fn test_first_frame_is_reconnected() {
        let hub = MemoryPushHub::new(16);
        let mut rx = hub.subscribe().await.unwrap();
        assert!(matches!(rx.recv().await, Some(PushFrame::Reconnected)));
    }

    #[tokio::test]
    async fn test_published_events_are_delivered() {
        let hub = MemoryPushHub::new(16);
        let mut rx = hub.subscribe().await.unwrap();
        assert!(matches!(rx.recv().await, Some(PushFrame::Reconnected)));

        let trainer = TrainerId::new();
        hub.publish(created_event(trainer));

        match rx.recv().await {
            Some(PushFrame::Event(event)) => assert_eq!(event.trainer_id(), trainer),
            other => panic!("expected event frame, got {other:?}"),
        }
    }
}
