//! # gymdesk-realtime
//!
//! Push-event engine for GymDesk. Keeps every view of a trainer's schedule
//! consistent without polling:
//!
//! - [`RealtimeSync`] consumes push frames, discards events for other
//!   trainers, refetches the schedule cache (events are triggers, not
//!   truth), and fans out transient [`UserNotice`]s.
//! - [`source::MemoryPushHub`] delivers events in-process.
//! - [`source::WsPushSource`] maintains a reconnecting WebSocket
//!   subscription against the backend's push stream.

pub mod notice;
pub mod source;
pub mod sync;

pub use notice::{NoticeKind, UserNotice};
pub use source::{MemoryPushHub, WsPushSource};
pub use sync::RealtimeSync;
