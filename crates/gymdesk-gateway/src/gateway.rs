//! The backend gateway contract.

use async_trait::async_trait;

use gymdesk_core::result::AppResult;
use gymdesk_core::types::id::{SessionId, TrainerId};
use gymdesk_entity::member::MemberProfile;
use gymdesk_entity::session::{SessionStatus, TrainingSession};

use crate::dto::CreateSessionRequest;

/// The collaborator operations the scheduling engine consumes.
///
/// Implementations must be safe to call concurrently; every mutation is a
/// full round-trip and the returned entity is the backend's authoritative
/// post-mutation state.
#[async_trait]
pub trait ScheduleGateway: Send + Sync + std::fmt::Debug + 'static {
    /// List every session booked with the trainer.
    async fn list_sessions_for_trainer(
        &self,
        trainer_id: TrainerId,
    ) -> AppResult<Vec<TrainingSession>>;

    /// Book a new session. Rejected with a conflict error when the slot is
    /// taken, regardless of what the caller's advisory check concluded.
    async fn create_session(&self, request: CreateSessionRequest) -> AppResult<TrainingSession>;

    /// Request a status transition for a session.
    async fn update_session_status(
        &self,
        session_id: SessionId,
        status: SessionStatus,
    ) -> AppResult<TrainingSession>;

    /// Remove a session record entirely (distinct from cancelling it).
    async fn delete_session(&self, session_id: SessionId) -> AppResult<()>;

    /// List the trainer's bookable members joined with their subscription
    /// balances.
    async fn list_eligible_members(&self, trainer_id: TrainerId)
    -> AppResult<Vec<MemberProfile>>;
}
