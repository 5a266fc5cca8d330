//! Shared test helpers for integration tests.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};

use gymdesk_core::config::store::StoreConfig;
use gymdesk_core::types::id::{BranchId, MemberId, SubscriptionId, TrainerId};
use gymdesk_entity::member::{Member, MemberProfile};
use gymdesk_entity::session::TrainingSession;
use gymdesk_entity::subscription::{Subscription, SubscriptionStatus, SubscriptionType};
use gymdesk_gateway::{InMemoryGateway, ScheduleGateway};
use gymdesk_realtime::source::MemoryPushHub;
use gymdesk_realtime::{RealtimeSync, UserNotice};
use gymdesk_scheduler::{BookingService, SessionCandidate};
use gymdesk_store::{RosterCache, ScheduleStore};

/// One backend shared by any number of client tabs.
pub struct TestApp {
    /// The in-memory backend.
    pub gateway: Arc<InMemoryGateway>,
    /// Push hub attached to the backend's event stream.
    pub hub: MemoryPushHub,
    /// The trainer under test.
    pub trainer_id: TrainerId,
}

/// One connected client: its own caches, booking service, and push sync —
/// the moral equivalent of a browser tab.
pub struct Tab {
    /// The tab's schedule cache.
    pub store: Arc<ScheduleStore>,
    /// The tab's roster cache.
    pub roster: Arc<RosterCache>,
    /// The tab's booking service.
    pub service: BookingService,
    /// Transient notices surfaced to this tab.
    pub notices: broadcast::Receiver<UserNotice>,
    /// Live schedule view.
    pub view: watch::Receiver<Vec<TrainingSession>>,
}

impl TestApp {
    /// Create a fresh backend and trainer.
    pub fn new() -> Self {
        let gateway = Arc::new(InMemoryGateway::new());
        let hub = MemoryPushHub::attached(gateway.event_sender());
        Self {
            gateway,
            hub,
            trainer_id: TrainerId::new(),
        }
    }

    /// Open a client tab and wait for its initial schedule refresh, so
    /// the push subscription is live before the test mutates anything.
    pub async fn open_tab(&self) -> Tab {
        let config = StoreConfig::default();
        let store = Arc::new(ScheduleStore::new(
            Arc::clone(&self.gateway) as Arc<dyn ScheduleGateway>,
            &config,
        ));
        let roster = Arc::new(RosterCache::new(
            Arc::clone(&self.gateway) as Arc<dyn ScheduleGateway>,
            &config,
        ));
        let service = BookingService::new(
            self.trainer_id,
            Arc::clone(&self.gateway) as Arc<dyn ScheduleGateway>,
            Arc::clone(&store),
            Arc::clone(&roster),
        );

        let sync = Arc::new(RealtimeSync::new(
            self.trainer_id,
            Arc::clone(&store),
            Arc::new(self.hub.clone()),
            16,
        ));
        let notices = sync.notices();

        let mut view = store.subscribe(self.trainer_id).await;
        tokio::spawn(async move { sync.run().await });

        // The first publish comes from the connect-time refresh; once it
        // lands, the hub subscription is established.
        tokio::time::timeout(Duration::from_secs(2), view.changed())
            .await
            .expect("tab never completed its initial refresh")
            .expect("schedule watch closed");

        Tab {
            store,
            roster,
            service,
            notices,
            view,
        }
    }
}

impl Tab {
    /// Wait until the live view satisfies a predicate.
    pub async fn wait_for_view<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&[TrainingSession]) -> bool,
    {
        let deadline = tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                if predicate(&self.view.borrow()) {
                    return;
                }
                self.view.changed().await.expect("schedule watch closed");
            }
        });
        deadline.await.expect("view never reached expected state");
    }

    /// Wait for the next transient notice.
    pub async fn next_notice(&mut self) -> UserNotice {
        tokio::time::timeout(Duration::from_secs(2), self.notices.recv())
            .await
            .expect("timed out waiting for a notice")
            .expect("notice channel closed")
    }
}

/// Tomorrow at a fixed hour, so candidates always start in the future.
pub fn tomorrow_at(hour: u32) -> DateTime<Utc> {
    (Utc::now() + chrono::Duration::days(1))
        .date_naive()
        .and_hms_opt(hour, 0, 0)
        .expect("valid time")
        .and_utc()
}

/// A booking candidate for tomorrow.
pub fn candidate_at(hour: u32, duration_minutes: u32) -> SessionCandidate {
    SessionCandidate {
        member_id: MemberId::new(),
        branch_id: BranchId::new(),
        starts_at: tomorrow_at(hour),
        duration_minutes,
        subscription_id: None,
        notes: None,
    }
}

/// A member joined with a single subscription.
pub fn member_with_subscription(
    name: &str,
    subscription_type: SubscriptionType,
    status: SubscriptionStatus,
    sessions_remaining: u32,
) -> MemberProfile {
    let member_id = MemberId::new();
    let (first_name, last_name) = name.split_once(' ').unwrap_or((name, "Test"));
    MemberProfile {
        member: Member {
            id: member_id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: None,
            phone: None,
            joined_at: Utc::now(),
        },
        subscriptions: vec![Subscription {
            id: SubscriptionId::new(),
            member_id,
            subscription_type,
            status,
            sessions_remaining,
            started_at: Utc::now(),
            expires_at: None,
        }],
    }
}
