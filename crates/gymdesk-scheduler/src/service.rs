//! The booking facade consumed by the UI.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::watch;
use tracing::{debug, warn};

use gymdesk_core::error::AppError;
use gymdesk_core::result::AppResult;
use gymdesk_core::types::id::{SessionId, TrainerId};
use gymdesk_entity::member::MemberProfile;
use gymdesk_entity::session::TrainingSession;
use gymdesk_gateway::ScheduleGateway;
use gymdesk_store::{RosterCache, ScheduleStore};

use crate::candidate::SessionCandidate;
use crate::conflict::{Conflict, find_conflict};
use crate::eligibility::filter_bookable;
use crate::lifecycle::{TransitionKind, ensure_allowed};

/// Keys of mutations currently awaiting a backend response.
///
/// This is the engine's only backpressure: an identical mutation is never
/// dispatched while one is pending. The permit releases its key on drop,
/// success or failure.
#[derive(Debug, Clone, Default)]
struct InFlightGuard {
    keys: Arc<DashMap<String, ()>>,
}

impl InFlightGuard {
    fn try_acquire(&self, key: String) -> Option<InFlightPermit> {
        use dashmap::mapref::entry::Entry;
        match self.keys.entry(key.clone()) {
            Entry::Occupied(_) => None,
            Entry::Vacant(vacant) => {
                vacant.insert(());
                Some(InFlightPermit {
                    keys: Arc::clone(&self.keys),
                    key,
                })
            }
        }
    }
}

#[derive(Debug)]
struct InFlightPermit {
    keys: Arc<DashMap<String, ()>>,
    key: String,
}

impl Drop for InFlightPermit {
    fn drop(&mut self) {
        self.keys.remove(&self.key);
    }
}

/// Booking operations for one trainer's schedule.
///
/// All mutations are optimistic round-trips: nothing is written to the
/// [`ScheduleStore`] until the backend acknowledges, so a rejection never
/// leaves the cache desynchronized — it triggers a resync instead.
#[derive(Debug, Clone)]
pub struct BookingService {
    /// The trainer whose schedule this service operates on.
    trainer_id: TrainerId,
    /// Backend gateway.
    gateway: Arc<dyn ScheduleGateway>,
    /// Schedule cache.
    store: Arc<ScheduleStore>,
    /// Bookable-member roster cache.
    roster: Arc<RosterCache>,
    /// In-flight mutation keys.
    in_flight: InFlightGuard,
}

impl BookingService {
    /// Create a service for one trainer.
    pub fn new(
        trainer_id: TrainerId,
        gateway: Arc<dyn ScheduleGateway>,
        store: Arc<ScheduleStore>,
        roster: Arc<RosterCache>,
    ) -> Self {
        Self {
            trainer_id,
            gateway,
            store,
            roster,
            in_flight: InFlightGuard::default(),
        }
    }

    /// The trainer this service is scoped to.
    pub fn trainer_id(&self) -> TrainerId {
        self.trainer_id
    }

    /// Members selectable on the booking form: those with a positive
    /// remaining balance on an active personal-training-bearing
    /// subscription. Members without one are excluded entirely.
    pub async fn eligible_members(&self) -> AppResult<Vec<MemberProfile>> {
        let profiles = self.roster.profiles_for(self.trainer_id).await?;
        Ok(filter_bookable(profiles.as_ref().clone()))
    }

    /// Live form validation: the session that would block the candidate,
    /// if any. Re-evaluate whenever the candidate or the schedule changes.
    pub async fn conflict_preview(
        &self,
        candidate: &SessionCandidate,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Conflict>> {
        candidate.validate_for_booking(now)?;
        let sessions = self.store.snapshot(self.trainer_id).await?;
        Ok(find_conflict(&sessions, &candidate.slot()))
    }

    /// Submit a booking.
    ///
    /// The local conflict check is advisory; the backend is the final
    /// arbiter. When the backend rejects — for instance because another
    /// client won the slot after our check passed — the schedule cache is
    /// resynchronized and the rejection surfaces as a recoverable error.
    pub async fn submit_candidate(
        &self,
        candidate: SessionCandidate,
    ) -> AppResult<TrainingSession> {
        candidate.validate_for_booking(Utc::now())?;

        let _permit = self
            .in_flight
            .try_acquire(format!(
                "create:{}:{}",
                self.trainer_id,
                candidate.starts_at.timestamp()
            ))
            .ok_or_else(|| AppError::busy("This booking is already being submitted"))?;

        let sessions = self.store.snapshot(self.trainer_id).await?;
        if let Some(conflict) = find_conflict(&sessions, &candidate.slot()) {
            return Err(AppError::conflict(conflict.describe()));
        }

        match self
            .gateway
            .create_session(candidate.into_request(self.trainer_id))
            .await
        {
            Ok(session) => {
                debug!(session_id = %session.id, "Booking accepted");
                self.store.apply_created(session.clone()).await;
                Ok(session)
            }
            Err(error) => {
                self.resync_after(&error).await;
                Err(error)
            }
        }
    }

    /// Request a lifecycle transition for a session on this trainer's
    /// schedule.
    ///
    /// Returns the backend's post-transition session, or `None` when the
    /// record was deleted.
    pub async fn request_transition(
        &self,
        session_id: SessionId,
        kind: TransitionKind,
    ) -> AppResult<Option<TrainingSession>> {
        let sessions = self.store.snapshot(self.trainer_id).await?;
        let current = sessions
            .iter()
            .find(|session| session.id == session_id)
            .ok_or_else(|| AppError::not_found("Session not found in the trainer's schedule"))?;

        ensure_allowed(current.status, kind)?;

        let _permit = self
            .in_flight
            .try_acquire(format!("{kind}:{session_id}"))
            .ok_or_else(|| AppError::busy(format!("A {kind} request is already in flight")))?;

        match kind.target_status() {
            None => match self.gateway.delete_session(session_id).await {
                Ok(()) => {
                    self.store.remove(self.trainer_id, session_id).await;
                    Ok(None)
                }
                Err(error) => {
                    self.resync_after(&error).await;
                    Err(error)
                }
            },
            Some(target) => match self.gateway.update_session_status(session_id, target).await {
                Ok(session) => {
                    debug!(%session_id, status = %session.status, "Transition accepted");
                    self.store.apply_updated(session.clone()).await;
                    Ok(Some(session))
                }
                Err(error) => {
                    self.resync_after(&error).await;
                    Err(error)
                }
            },
        }
    }

    /// A live, auto-updating view of the trainer's schedule.
    ///
    /// The initial snapshot is fetched before the receiver is handed out,
    /// so the view never starts from guessed state.
    pub async fn subscribe(&self) -> AppResult<watch::Receiver<Vec<TrainingSession>>> {
        self.store.snapshot(self.trainer_id).await?;
        Ok(self.store.subscribe(self.trainer_id).await)
    }

    /// Force a resynchronization of the schedule cache.
    pub async fn refresh(&self) -> AppResult<()> {
        self.store.refresh(self.trainer_id).await.map(|_| ())
    }

    /// A backend rejection implies our snapshot may be stale (a conflict
    /// we did not see, a transition raced by another client, a transport
    /// fault mid-mutation). Resynchronize; if that also fails, leave the
    /// entry invalidated so the next read retries.
    async fn resync_after(&self, error: &AppError) {
        if !error.kind.implies_stale_cache() {
            return;
        }
        if let Err(refresh_error) = self.store.refresh(self.trainer_id).await {
            warn!(%refresh_error, trainer_id = %self.trainer_id, "Post-rejection refresh failed");
            self.store.invalidate(self.trainer_id).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    use gymdesk_core::config::store::StoreConfig;
    use gymdesk_core::error::ErrorKind;
    use gymdesk_core::types::id::{BranchId, MemberId, SubscriptionId};
    use gymdesk_entity::member::Member;
    use gymdesk_entity::session::SessionStatus;
    use gymdesk_entity::subscription::{Subscription, SubscriptionStatus, SubscriptionType};
    use gymdesk_gateway::InMemoryGateway;
    use gymdesk_gateway::dto::CreateSessionRequest;

    fn service_over(gateway: Arc<InMemoryGateway>, trainer_id: TrainerId) -> BookingService {
        let config = StoreConfig::default();
        let store = Arc::new(ScheduleStore::new(
            Arc::clone(&gateway) as Arc<dyn ScheduleGateway>,
            &config,
        ));
        let roster = Arc::new(RosterCache::new(
            Arc::clone(&gateway) as Arc<dyn ScheduleGateway>,
            &config,
        ));
        BookingService::new(trainer_id, gateway, store, roster)
    }

    fn tomorrow_at(hour: u32) -> DateTime<Utc> {
        (Utc::now() + Duration::days(1))
            .date_naive()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
            .and_utc()
    }

    fn candidate(hour: u32, duration_minutes: u32) -> SessionCandidate {
        SessionCandidate {
            member_id: MemberId::new(),
            branch_id: BranchId::new(),
            starts_at: tomorrow_at(hour),
            duration_minutes,
            subscription_id: None,
            notes: None,
        }
    }

    fn profile_with_balance(sessions_remaining: u32) -> MemberProfile {
        let member_id = MemberId::new();
        MemberProfile {
            member: Member {
                id: member_id,
                first_name: "Yui".to_string(),
                last_name: "Mori".to_string(),
                email: None,
                phone: None,
                joined_at: Utc::now(),
            },
            subscriptions: vec![Subscription {
                id: SubscriptionId::new(),
                member_id,
                subscription_type: SubscriptionType::Combo,
                status: SubscriptionStatus::Active,
                sessions_remaining,
                started_at: Utc::now(),
                expires_at: None,
            }],
        }
    }

    #[tokio::test]
    async fn test_submit_books_and_caches_the_session() {
        let gateway = Arc::new(InMemoryGateway::new());
        let trainer = TrainerId::new();
        let service = service_over(gateway, trainer);

        let session = service.submit_candidate(candidate(9, 60)).await.unwrap();
        assert_eq!(session.status, SessionStatus::Pending);

        let view = service.subscribe().await.unwrap();
        assert_eq!(view.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_locally_detected_conflict_is_rejected() {
        let gateway = Arc::new(InMemoryGateway::new());
        let trainer = TrainerId::new();
        let service = service_over(gateway, trainer);

        service.submit_candidate(candidate(9, 60)).await.unwrap();
        let err = service.submit_candidate(candidate(9, 30)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_boundary_candidate_is_accepted() {
        let gateway = Arc::new(InMemoryGateway::new());
        let trainer = TrainerId::new();
        let service = service_over(gateway, trainer);

        service.submit_candidate(candidate(9, 60)).await.unwrap();
        assert!(service.submit_candidate(candidate(10, 30)).await.is_ok());
    }

    #[tokio::test]
    async fn test_backend_rejection_after_race_resyncs_the_cache() {
        let gateway = Arc::new(InMemoryGateway::new());
        let trainer = TrainerId::new();
        let service = service_over(Arc::clone(&gateway), trainer);

        // Warm the cache while the slot is free.
        assert!(
            service
                .conflict_preview(&candidate(9, 60), Utc::now())
                .await
                .unwrap()
                .is_none()
        );

        // Another client takes the slot behind our back.
        gateway
            .create_session(CreateSessionRequest {
                trainer_id: trainer,
                member_id: MemberId::new(),
                branch_id: BranchId::new(),
                starts_at: tomorrow_at(9),
                duration_minutes: 60,
                subscription_id: None,
                notes: None,
            })
            .await
            .unwrap();

        // Our advisory check passed on the stale snapshot; the backend
        // rejects, and the rejection resynchronizes the cache.
        let err = service.submit_candidate(candidate(9, 60)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        let view = service.subscribe().await.unwrap();
        assert_eq!(view.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_transition_chain_and_terminal_rejection() {
        let gateway = Arc::new(InMemoryGateway::new());
        let trainer = TrainerId::new();
        let service = service_over(gateway, trainer);

        let session = service.submit_candidate(candidate(9, 60)).await.unwrap();

        let confirmed = service
            .request_transition(session.id, TransitionKind::Confirm)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(confirmed.status, SessionStatus::Confirmed);

        let cancelled = service
            .request_transition(session.id, TransitionKind::Cancel)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cancelled.status, SessionStatus::Cancelled);

        let err = service
            .request_transition(session.id, TransitionKind::Complete)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Transition);
    }

    #[tokio::test]
    async fn test_delete_removes_the_record() {
        let gateway = Arc::new(InMemoryGateway::new());
        let trainer = TrainerId::new();
        let service = service_over(gateway, trainer);

        let session = service.submit_candidate(candidate(9, 60)).await.unwrap();
        let outcome = service
            .request_transition(session.id, TransitionKind::Delete)
            .await
            .unwrap();
        assert!(outcome.is_none());

        let view = service.subscribe().await.unwrap();
        assert!(view.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_session_transition_is_not_found() {
        let gateway = Arc::new(InMemoryGateway::new());
        let service = service_over(gateway, TrainerId::new());

        let err = service
            .request_transition(SessionId::new(), TransitionKind::Confirm)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_eligible_members_excludes_zero_balance() {
        let gateway = Arc::new(InMemoryGateway::new());
        gateway.seed_member(profile_with_balance(3)).await;
        gateway.seed_member(profile_with_balance(0)).await;

        let service = service_over(gateway, TrainerId::new());
        let members = service.eligible_members().await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].subscriptions[0].sessions_remaining, 3);
    }

    #[test]
    fn test_in_flight_guard_blocks_duplicates_until_released() {
        let guard = InFlightGuard::default();
        let permit = guard.try_acquire("confirm:abc".to_string());
        assert!(permit.is_some());
        assert!(guard.try_acquire("confirm:abc".to_string()).is_none());
        drop(permit);
        assert!(guard.try_acquire("confirm:abc".to_string()).is_some());
    }
}
