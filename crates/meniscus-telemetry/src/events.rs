//! Evolution event types.
//!
//! Structured events emitted by the evolution driver at fixed points of
//! each time step.

use serde::{Deserialize, Serialize};

/// An event emitted during an evolution run, tagged with the step index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionEvent {
    /// Time step index (0 is the initial state).
    pub step: u64,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// Step started.
    StepBegin {
        /// Simulation time the step advances to.
        time: f64,
        /// Time step size.
        time_step: f64,
    },

    /// Linear system solved.
    LinearSolve {
        /// Solver backend name.
        solver: String,
        /// System size.
        dofs: usize,
        /// Euclidean norm of the right-hand side.
        rhs_norm: f64,
        /// Relative residual `|b - Ax| / |b|` (absolute if `b = 0`).
        relative_residual: f64,
    },

    /// Stationarity check result.
    Stationarity {
        /// Largest absolute displacement component.
        max_displacement: f64,
        /// Tolerance the check used.
        tolerance: f64,
        /// Whether the interface is considered stationary.
        stationary: bool,
    },

    /// Step completed.
    StepEnd {
        /// Wall-clock time for the step (seconds).
        wall_time: f64,
    },

    /// Geometric diagnostics after the step.
    Geometry {
        /// Interface length or area.
        measure: f64,
        /// Enclosed area or volume.
        enclosed_volume: f64,
        /// Mean vertex distance from the origin.
        average_radius: f64,
    },

    /// Custom event for extensibility.
    Custom {
        /// Arbitrary label.
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl EvolutionEvent {
    /// Creates a new event for the given step.
    pub fn new(step: u64, kind: EventKind) -> Self {
        Self { step, kind }
    }
}
