//! The push-driven schedule synchronizer.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use gymdesk_core::result::AppResult;
use gymdesk_core::traits::push::{PushFrame, PushSource};
use gymdesk_core::types::id::TrainerId;
use gymdesk_store::ScheduleStore;

use crate::notice::UserNotice;

/// Subscribes to the push stream and keeps a trainer's [`ScheduleStore`]
/// entry consistent without polling.
///
/// The trainer identity is passed in explicitly rather than read from
/// ambient auth state, so the component is testable in isolation. Events
/// naming another trainer are discarded; events naming this trainer
/// trigger an authoritative refetch, which makes out-of-order delivery
/// harmless.
#[derive(Debug)]
pub struct RealtimeSync {
    /// The trainer whose schedule this synchronizer maintains.
    trainer_id: TrainerId,
    /// The cache to resynchronize.
    store: Arc<ScheduleStore>,
    /// Frame transport.
    source: Arc<dyn PushSource>,
    /// Transient-notice fan-out.
    notices: broadcast::Sender<UserNotice>,
}

impl RealtimeSync {
    /// Create a synchronizer for one trainer.
    pub fn new(
        trainer_id: TrainerId,
        store: Arc<ScheduleStore>,
        source: Arc<dyn PushSource>,
        notice_buffer: usize,
    ) -> Self {
        let (notices, _) = broadcast::channel(notice_buffer.max(1));
        Self {
            trainer_id,
            store,
            source,
            notices,
        }
    }

    /// Subscribe to the transient notices this synchronizer emits.
    pub fn notices(&self) -> broadcast::Receiver<UserNotice> {
        self.notices.subscribe()
    }

    /// Consume frames until the source closes.
    ///
    /// Run this on its own task; it returns only when the push source is
    /// shut down.
    pub async fn run(&self) -> AppResult<()> {
        let mut frames = self.source.subscribe().await?;

        while let Some(frame) = frames.recv().await {
            match frame {
                PushFrame::Reconnected => {
                    // Events may have been missed while disconnected, so
                    // the snapshot cannot be trusted until refetched.
                    info!(trainer_id = %self.trainer_id, "Push stream connected, refreshing schedule");
                    self.resync().await;
                }
                PushFrame::Event(event) => {
                    if event.trainer_id() != self.trainer_id {
                        debug!(
                            event_trainer = %event.trainer_id(),
                            "Discarding push event for another trainer"
                        );
                        continue;
                    }
                    self.resync().await;
                    let _ = self.notices.send(UserNotice::from_event(&event));
                }
            }
        }

        info!(trainer_id = %self.trainer_id, "Push stream closed");
        Ok(())
    }

    async fn resync(&self) {
        if let Err(error) = self.store.refresh(self.trainer_id).await {
            // Leave the entry invalidated so the next read retries the
            // fetch instead of serving the stale snapshot.
            warn!(%error, trainer_id = %self.trainer_id, "Schedule refresh failed");
            self.store.invalidate(self.trainer_id).await;
        }
    }
}
