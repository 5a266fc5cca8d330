//! In-memory backend double.
//!
//! Behaves like the real backend at the contract boundary: it is the final
//! arbiter of the no-overlap invariant, enforces lifecycle legality, debits
//! the linked subscription when a session completes, and publishes push
//! events. Used by tests and local demos.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, broadcast};
use validator::Validate;

use gymdesk_core::error::AppError;
use gymdesk_core::events::ScheduleEvent;
use gymdesk_core::result::AppResult;
use gymdesk_core::types::id::{SessionId, TrainerId};
use gymdesk_core::types::reference::Ref;
use gymdesk_core::types::slot::TimeSlot;
use gymdesk_entity::member::MemberProfile;
use gymdesk_entity::session::{SessionStatus, TrainingSession};

use crate::dto::CreateSessionRequest;
use crate::gateway::ScheduleGateway;

/// In-memory [`ScheduleGateway`] implementation.
#[derive(Debug)]
pub struct InMemoryGateway {
    /// Session records in creation order.
    sessions: Mutex<Vec<TrainingSession>>,
    /// Member + subscription joins, keyed implicitly by member id.
    members: Mutex<Vec<MemberProfile>>,
    /// Push-event fan-out.
    events: broadcast::Sender<ScheduleEvent>,
}

impl Default for InMemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryGateway {
    /// Create an empty gateway with its own event channel.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(256);
        Self {
            sessions: Mutex::new(Vec::new()),
            members: Mutex::new(Vec::new()),
            events,
        }
    }

    /// Handle for attaching a push hub to this gateway's event stream.
    pub fn event_sender(&self) -> broadcast::Sender<ScheduleEvent> {
        self.events.clone()
    }

    /// Seed a member + subscription join.
    pub async fn seed_member(&self, profile: MemberProfile) {
        self.members.lock().await.push(profile);
    }

    /// Seed an existing session record.
    pub async fn seed_session(&self, session: TrainingSession) {
        self.sessions.lock().await.push(session);
    }

    fn emit(&self, event: ScheduleEvent) {
        // Nobody subscribed is fine; the send result is irrelevant.
        let _ = self.events.send(event);
    }
}

#[async_trait]
impl ScheduleGateway for InMemoryGateway {
    async fn list_sessions_for_trainer(
        &self,
        trainer_id: TrainerId,
    ) -> AppResult<Vec<TrainingSession>> {
        let sessions = self.sessions.lock().await;
        Ok(sessions
            .iter()
            .filter(|s| s.trainer_id() == trainer_id)
            .cloned()
            .collect())
    }

    async fn create_session(&self, request: CreateSessionRequest) -> AppResult<TrainingSession> {
        request
            .validate()
            .map_err(|e| AppError::validation(format!("Invalid booking payload: {e}")))?;

        let member = {
            let members = self.members.lock().await;
            members
                .iter()
                .find(|p| p.member.id == request.member_id)
                .map(|p| p.member.clone())
        };

        let mut sessions = self.sessions.lock().await;

        // The backend re-checks occupancy no matter what the client
        // concluded; two clients can race past their advisory checks.
        let candidate = TimeSlot::from_start_duration(request.starts_at, request.duration_minutes);
        if let Some(existing) = sessions
            .iter()
            .filter(|s| s.trainer_id() == request.trainer_id && s.occupies_slot())
            .find(|s| s.slot().overlaps(&candidate))
        {
            return Err(AppError::conflict(format!(
                "Trainer already has a session from {} to {}",
                existing.starts_at.format("%Y-%m-%d %H:%M"),
                existing.ends_at().format("%H:%M")
            )));
        }

        let now = Utc::now();
        let session = TrainingSession {
            id: SessionId::new(),
            member: match member {
                Some(m) => Ref::Embedded(m),
                None => Ref::Id(request.member_id),
            },
            trainer: Ref::Id(request.trainer_id),
            branch: Ref::Id(request.branch_id),
            starts_at: request.starts_at,
            duration_minutes: request.duration_minutes,
            status: SessionStatus::Pending,
            subscription_id: request.subscription_id,
            notes: request.notes,
            created_at: now,
            updated_at: now,
        };
        sessions.push(session.clone());
        drop(sessions);

        self.emit(ScheduleEvent::SessionCreated {
            session_id: session.id,
            trainer_id: session.trainer_id(),
            member_id: session.member_id(),
            starts_at: session.starts_at,
            duration_minutes: session.duration_minutes,
        });
        Ok(session)
    }

    async fn update_session_status(
        &self,
        session_id: SessionId,
        status: SessionStatus,
    ) -> AppResult<TrainingSession> {
        let updated = {
            let mut sessions = self.sessions.lock().await;
            let session = sessions
                .iter_mut()
                .find(|s| s.id == session_id)
                .ok_or_else(|| AppError::not_found("Session not found"))?;

            if !session.status.can_transition_to(status) {
                return Err(AppError::transition(format!(
                    "Cannot move a {} session to {status}",
                    session.status
                )));
            }

            session.status = status;
            session.updated_at = Utc::now();
            session.clone()
        };

        // Completion debits the linked subscription, or the first
        // personal-training-bearing one when no link was recorded.
        if status == SessionStatus::Completed {
            let mut members = self.members.lock().await;
            if let Some(profile) = members
                .iter_mut()
                .find(|p| p.member.id == updated.member_id())
            {
                let target = profile.subscriptions.iter_mut().find(|s| {
                    match updated.subscription_id {
                        Some(linked) => s.id == linked,
                        None => s.counts_toward_booking(),
                    }
                });
                if let Some(subscription) = target {
                    subscription.sessions_remaining =
                        subscription.sessions_remaining.saturating_sub(1);
                }
            }
        }

        self.emit(ScheduleEvent::SessionUpdated {
            session_id: updated.id,
            trainer_id: updated.trainer_id(),
            status: updated.status.as_str().to_string(),
            starts_at: updated.starts_at,
        });
        Ok(updated)
    }

    async fn delete_session(&self, session_id: SessionId) -> AppResult<()> {
        let removed = {
            let mut sessions = self.sessions.lock().await;
            let position = sessions
                .iter()
                .position(|s| s.id == session_id)
                .ok_or_else(|| AppError::not_found("Session not found"))?;
            sessions.remove(position)
        };

        self.emit(ScheduleEvent::SessionDeleted {
            session_id: removed.id,
            trainer_id: removed.trainer_id(),
            starts_at: removed.starts_at,
        });
        Ok(())
    }

    async fn list_eligible_members(
        &self,
        _trainer_id: TrainerId,
    ) -> AppResult<Vec<MemberProfile>> {
        Ok(self.members.lock().await.clone())
    }
}
