//! # gymdesk-scheduler
//!
//! Booking logic for GymDesk. The pure pieces — slot indexing, conflict
//! detection, the lifecycle transition table, and eligibility rules — are
//! plain functions over entities; [`BookingService`] composes them with the
//! gateway and the caches into the surface the UI consumes.

pub mod candidate;
pub mod conflict;
pub mod eligibility;
pub mod lifecycle;
pub mod service;
pub mod slots;

pub use candidate::SessionCandidate;
pub use conflict::{Conflict, find_conflict};
pub use eligibility::{filter_bookable, is_bookable, remaining_session_balance};
pub use lifecycle::{TransitionKind, allowed_transitions, ensure_allowed};
pub use service::BookingService;
pub use slots::SlotIndex;
