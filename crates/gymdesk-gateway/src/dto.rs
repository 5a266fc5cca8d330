//! Request and response payloads exchanged with the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use gymdesk_core::types::id::{BranchId, MemberId, SubscriptionId, TrainerId};
use gymdesk_entity::session::SessionStatus;

/// Payload for booking a new session.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSessionRequest {
    /// The trainer the session is booked with.
    pub trainer_id: TrainerId,
    /// The member the session is booked for.
    pub member_id: MemberId,
    /// The branch the session takes place at.
    pub branch_id: BranchId,
    /// When the session starts.
    pub starts_at: DateTime<Utc>,
    /// Session length in minutes.
    #[validate(range(min = 1, max = 480))]
    pub duration_minutes: u32,
    /// The subscription to debit, if the trainer picked one explicitly.
    pub subscription_id: Option<SubscriptionId>,
    /// Free-text notes.
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Payload for a status transition request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    /// The requested target status.
    pub status: SessionStatus,
}

/// Error body the backend attaches to non-success responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code.
    #[serde(default)]
    pub code: Option<String>,
    /// Human-readable error description.
    #[serde(default)]
    pub message: Option<String>,
}
