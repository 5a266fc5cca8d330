//! # gymdesk-gateway
//!
//! Backend gateway for GymDesk. Defines the [`ScheduleGateway`] contract —
//! the five collaborator operations the scheduling engine consumes — plus
//! two implementations:
//!
//! - [`http::HttpScheduleGateway`]: the production REST client
//! - [`memory::InMemoryGateway`]: an in-process backend double that keeps
//!   the authoritative no-overlap invariant, used by tests and local demos
//!
//! The backend is always the final arbiter; client-side conflict checks
//! are advisory.

pub mod dto;
pub mod gateway;
pub mod http;
pub mod memory;

pub use dto::{CreateSessionRequest, UpdateStatusRequest};
pub use gateway::ScheduleGateway;
pub use http::HttpScheduleGateway;
pub use memory::InMemoryGateway;
