//! # meniscus-cli
//!
//! Run files and command implementations behind the `meniscus` binary.

pub mod commands;
pub mod logging;
pub mod run_spec;

pub use run_spec::{MeshSpec, OutputSpec, RunSpec};
