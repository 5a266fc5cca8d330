//! Schedule-related push events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::id::{MemberId, SessionId, TrainerId};

/// Events describing changes to a trainer's schedule.
///
/// Each variant names the trainer the session belongs to; clients discard
/// events for other trainers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScheduleEvent {
    /// A session was booked.
    SessionCreated {
        /// The session ID.
        session_id: SessionId,
        /// The trainer the session is booked with.
        trainer_id: TrainerId,
        /// The member the session is booked for.
        member_id: MemberId,
        /// When the session starts.
        starts_at: DateTime<Utc>,
        /// Session length in minutes.
        duration_minutes: u32,
    },
    /// A session changed (status or timing).
    SessionUpdated {
        /// The session ID.
        session_id: SessionId,
        /// The trainer the session is booked with.
        trainer_id: TrainerId,
        /// The session's status after the update.
        status: String,
        /// When the session starts.
        starts_at: DateTime<Utc>,
    },
    /// A session record was removed.
    SessionDeleted {
        /// The session ID.
        session_id: SessionId,
        /// The trainer the session was booked with.
        trainer_id: TrainerId,
        /// When the removed session would have started.
        starts_at: DateTime<Utc>,
    },
}

impl ScheduleEvent {
    /// The session the event refers to.
    pub fn session_id(&self) -> SessionId {
        match self {
            Self::SessionCreated { session_id, .. }
            | Self::SessionUpdated { session_id, .. }
            | Self::SessionDeleted { session_id, .. } => *session_id,
        }
    }

    /// The trainer the event is scoped to.
    pub fn trainer_id(&self) -> TrainerId {
        match self {
            Self::SessionCreated { trainer_id, .. }
            | Self::SessionUpdated { trainer_id, .. }
            | Self::SessionDeleted { trainer_id, .. } => *trainer_id,
        }
    }

    /// The start instant of the session the event refers to.
    pub fn starts_at(&self) -> DateTime<Utc> {
        match self {
            Self::SessionCreated { starts_at, .. }
            | Self::SessionUpdated { starts_at, .. }
            | Self::SessionDeleted { starts_at, .. } => *starts_at,
        }
    }
}
