//! # gymdesk-entity
//!
//! Domain entity models for GymDesk. Every struct in this crate represents
//! a backend resource or a domain value object. All entities derive
//! `Debug`, `Clone`, `Serialize`, and `Deserialize`.

pub mod branch;
pub mod member;
pub mod session;
pub mod subscription;
pub mod trainer;
