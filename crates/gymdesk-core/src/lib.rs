//! # gymdesk-core
//!
//! Core crate for the GymDesk scheduling engine. Contains traits,
//! configuration schemas, typed identifiers, polymorphic entity references,
//! time slots, domain events, and the unified error system.
//!
//! This crate has **no** internal dependencies on other GymDesk crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
