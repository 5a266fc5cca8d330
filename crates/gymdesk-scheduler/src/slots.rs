//! Busy-slot index over a trainer's session list.

use gymdesk_core::types::id::SessionId;
use gymdesk_core::types::slot::TimeSlot;
use gymdesk_entity::session::TrainingSession;

/// One occupied interval on a trainer's calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusySlot {
    /// The session occupying the interval.
    pub session_id: SessionId,
    /// The occupied interval.
    pub slot: TimeSlot,
}

/// The set of intervals a trainer's pending and confirmed sessions occupy.
///
/// Completed, cancelled, and no-show sessions are history and never appear
/// in the index. Slots keep the input list order, so overlap scans are
/// deterministic.
#[derive(Debug, Clone)]
pub struct SlotIndex {
    slots: Vec<BusySlot>,
}

impl SlotIndex {
    /// Build the index from a trainer's session list. Pure; rebuild it
    /// whenever the underlying list changes.
    pub fn build(sessions: &[TrainingSession]) -> Self {
        let slots = sessions
            .iter()
            .filter(|session| session.occupies_slot())
            .map(|session| BusySlot {
                session_id: session.id,
                slot: session.slot(),
            })
            .collect();
        Self { slots }
    }

    /// The first indexed slot overlapping the candidate, in list order.
    pub fn first_overlap(&self, candidate: &TimeSlot) -> Option<SessionId> {
        self.slots
            .iter()
            .find(|busy| busy.slot.overlaps(candidate))
            .map(|busy| busy.session_id)
    }

    /// Whether the candidate interval is free.
    pub fn is_free(&self, candidate: &TimeSlot) -> bool {
        self.first_overlap(candidate).is_none()
    }

    /// The indexed busy slots, in list order.
    pub fn slots(&self) -> &[BusySlot] {
        &self.slots
    }
}
