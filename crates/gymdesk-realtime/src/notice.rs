//! Transient user-facing notices.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gymdesk_core::events::ScheduleEvent;
use gymdesk_core::types::id::SessionId;

/// What kind of schedule change a notice describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// A session appeared on the calendar.
    BookingCreated,
    /// A session changed status or timing.
    BookingUpdated,
    /// A session record was removed.
    BookingRemoved,
}

/// A transient notification describing what changed on the calendar.
///
/// Notices are display hints only; the schedule cache is already
/// resynchronized by the time one is emitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserNotice {
    /// What changed.
    pub kind: NoticeKind,
    /// The session concerned.
    pub session_id: SessionId,
    /// Ready-to-render message text.
    pub message: String,
    /// When the notice was produced.
    pub timestamp: DateTime<Utc>,
}

impl UserNotice {
    /// Build the notice for a push event.
    pub fn from_event(event: &ScheduleEvent) -> Self {
        let (kind, message) = match event {
            ScheduleEvent::SessionCreated {
                starts_at,
                duration_minutes,
                ..
            } => (
                NoticeKind::BookingCreated,
                format!(
                    "New booking on {} at {} ({duration_minutes} min)",
                    starts_at.format("%Y-%m-%d"),
                    starts_at.format("%H:%M"),
                ),
            ),
            ScheduleEvent::SessionUpdated {
                starts_at, status, ..
            } => (
                NoticeKind::BookingUpdated,
                format!(
                    "Booking on {} at {} is now {status}",
                    starts_at.format("%Y-%m-%d"),
                    starts_at.format("%H:%M"),
                ),
            ),
            ScheduleEvent::SessionDeleted { starts_at, .. } => (
                NoticeKind::BookingRemoved,
                format!(
                    "Booking on {} at {} was removed",
                    starts_at.format("%Y-%m-%d"),
                    starts_at.format("%H:%M"),
                ),
            ),
        };

        Self {
            kind,
            session_id: event.session_id(),
            message,
            timestamp: Utc::now(),
        }
    }
}
