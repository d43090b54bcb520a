//! # meniscus-telemetry
//!
//! Event bus for evolution telemetry. Emits structured events
//! (step timing, linear solves, stationarity, geometry) that can be
//! consumed by pluggable sinks (in-memory, `tracing`, JSON lines).

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, EvolutionEvent};
