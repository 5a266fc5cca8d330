//! Personal trainer domain entities.

pub mod model;

pub use model::Trainer;
