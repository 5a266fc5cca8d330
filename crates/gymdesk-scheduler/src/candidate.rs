//! Booking candidates submitted from the booking form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use gymdesk_core::error::AppError;
use gymdesk_core::result::AppResult;
use gymdesk_core::types::id::{BranchId, MemberId, SubscriptionId, TrainerId};
use gymdesk_core::types::slot::TimeSlot;
use gymdesk_gateway::dto::CreateSessionRequest;

/// A session the trainer is about to book.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SessionCandidate {
    /// The member the session is for.
    pub member_id: MemberId,
    /// The branch the session takes place at.
    pub branch_id: BranchId,
    /// When the session starts.
    pub starts_at: DateTime<Utc>,
    /// Session length in minutes.
    #[validate(range(min = 1, max = 480))]
    pub duration_minutes: u32,
    /// The subscription to debit, if picked explicitly.
    pub subscription_id: Option<SubscriptionId>,
    /// Free-text notes.
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

impl SessionCandidate {
    /// The half-open interval the candidate would occupy.
    pub fn slot(&self) -> TimeSlot {
        TimeSlot::from_start_duration(self.starts_at, self.duration_minutes)
    }

    /// Reject malformed candidates before any conflict check runs.
    ///
    /// A past start time is a validation failure, not a conflict.
    pub fn validate_for_booking(&self, now: DateTime<Utc>) -> AppResult<()> {
        self.validate()
            .map_err(|e| AppError::validation(format!("Invalid booking candidate: {e}")))?;
        if self.starts_at <= now {
            return Err(AppError::validation(
                "Session start must be in the future",
            ));
        }
        Ok(())
    }

    /// Build the backend payload for this candidate.
    pub fn into_request(self, trainer_id: TrainerId) -> CreateSessionRequest {
        CreateSessionRequest {
            trainer_id,
            member_id: self.member_id,
            branch_id: self.branch_id,
            starts_at: self.starts_at,
            duration_minutes: self.duration_minutes,
            subscription_id: self.subscription_id,
            notes: self.notes,
        }
    }
}
