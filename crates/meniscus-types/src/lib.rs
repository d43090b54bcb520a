//! # meniscus-types
//!
//! Shared error types and numerical constants for the meniscus
//! interface evolution engine.
//!
//! This crate has zero domain logic — it defines the vocabulary
//! that all other meniscus crates share.

pub mod constants;
pub mod error;

pub use error::{MeniscusError, MeniscusResult};
