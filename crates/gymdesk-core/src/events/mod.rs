//! Domain events pushed by the backend.
//!
//! Events carry scalar summaries only. The schedule cache treats them as
//! invalidation triggers and refetches from the backend, which stays the
//! single source of truth even when events arrive out of order.

pub mod schedule;

pub use schedule::ScheduleEvent;
