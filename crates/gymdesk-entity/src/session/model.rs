//! Training session entity model.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use gymdesk_core::types::id::{BranchId, MemberId, SessionId, SubscriptionId, TrainerId};
use gymdesk_core::types::reference::Ref;
use gymdesk_core::types::slot::TimeSlot;

use crate::branch::Branch;
use crate::member::Member;
use crate::trainer::Trainer;

use super::status::SessionStatus;

/// One scheduled personal-training appointment between a member and a
/// trainer.
///
/// Participant references may arrive as bare ids or embedded profiles
/// depending on the endpoint; see [`Ref`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSession {
    /// Unique session identifier.
    pub id: SessionId,
    /// The member the session is booked for.
    pub member: Ref<Member>,
    /// The trainer delivering the session.
    pub trainer: Ref<Trainer>,
    /// The branch the session takes place at.
    pub branch: Ref<Branch>,
    /// When the session starts.
    pub starts_at: DateTime<Utc>,
    /// Session length in minutes. Always positive.
    pub duration_minutes: u32,
    /// Current lifecycle status.
    pub status: SessionStatus,
    /// The subscription the session will be debited from, if linked.
    pub subscription_id: Option<SubscriptionId>,
    /// Free-text notes from the trainer.
    pub notes: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last modified.
    pub updated_at: DateTime<Utc>,
}

impl TrainingSession {
    /// When the session ends.
    pub fn ends_at(&self) -> DateTime<Utc> {
        self.starts_at + Duration::minutes(i64::from(self.duration_minutes))
    }

    /// The half-open interval the session occupies.
    pub fn slot(&self) -> TimeSlot {
        TimeSlot::from_start_duration(self.starts_at, self.duration_minutes)
    }

    /// Whether the session currently occupies the trainer's time.
    pub fn occupies_slot(&self) -> bool {
        self.status.occupies_slot()
    }

    /// The member's identifier, whichever reference shape is held.
    pub fn member_id(&self) -> MemberId {
        self.member.id()
    }

    /// The trainer's identifier, whichever reference shape is held.
    pub fn trainer_id(&self) -> TrainerId {
        self.trainer.id()
    }

    /// The branch's identifier, whichever reference shape is held.
    pub fn branch_id(&self) -> BranchId {
        self.branch.id()
    }
}
