//! Conflict detection over a trainer's schedule.

use gymdesk_core::types::slot::TimeSlot;
use gymdesk_entity::session::TrainingSession;

use crate::slots::SlotIndex;

/// A candidate interval blocked by an existing session.
#[derive(Debug, Clone)]
pub struct Conflict {
    /// The session occupying the candidate's interval.
    pub blocking: TrainingSession,
}

impl Conflict {
    /// Render the warning shown next to the booking form.
    pub fn describe(&self) -> String {
        format!(
            "The trainer is already booked from {} to {} with {}",
            self.blocking.starts_at.format("%Y-%m-%d %H:%M"),
            self.blocking.ends_at().format("%H:%M"),
            self.blocking.member.label(),
        )
    }
}

/// Find the first session blocking the candidate interval, in list order.
///
/// Pure and advisory: the backend re-checks occupancy on submission, so a
/// pass here can still be rejected when clients race.
pub fn find_conflict(sessions: &[TrainingSession], candidate: &TimeSlot) -> Option<Conflict> {
    let index = SlotIndex::build(sessions);
    let blocking_id = index.first_overlap(candidate)?;
    sessions
        .iter()
        .find(|session| session.id == blocking_id)
        .map(|session| Conflict {
            blocking: session.clone(),
        })
}
