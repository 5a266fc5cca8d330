//! Core traits defined in `gymdesk-core` and implemented by other crates.

pub mod push;

pub use push::{PushFrame, PushSource};
