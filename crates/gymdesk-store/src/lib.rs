//! # gymdesk-store
//!
//! Client-side caches for GymDesk:
//!
//! - [`ScheduleStore`]: the single source of truth for a trainer's
//!   calendar within one client session. Refreshed by query and by push
//!   events; written only from confirmed backend responses.
//! - [`RosterCache`]: TTL-bounded cache of the member + subscription join
//!   behind the booking form.

pub mod roster;
pub mod schedule;

pub use roster::RosterCache;
pub use schedule::ScheduleStore;
