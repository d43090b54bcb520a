//! Evolution configuration.
//!
//! Parameters that control a run: flow law, time stepping, stopping
//! criteria and linear solver. Loadable from TOML; missing keys take the
//! defaults below.

use serde::{Deserialize, Serialize};

use meniscus_math::LinearSolverKind;
use meniscus_types::constants::{
    DEFAULT_END_TIME, DEFAULT_STATIONARY_TOLERANCE, DEFAULT_TIME_STEP,
};
use meniscus_types::{MeniscusError, MeniscusResult};

use crate::flow::{CouplingQuadrature, FlowLaw};

/// Configuration for an interface evolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Mean curvature flow if true, surface diffusion otherwise.
    pub use_mean_curvature_flow: bool,

    /// Final time. Steps run while `t ≤ end_time + 0.1·Δt`.
    pub end_time: f64,

    /// Fixed time increment Δt.
    pub time_step: f64,

    /// Keep stepping past `end_time` until the interface is stationary.
    /// Enables the stationarity check.
    pub create_stationary_interface: bool,

    /// Absolute bound on every displacement component for a step to count
    /// as stationary.
    pub stationary_tolerance: f64,

    /// Integration points of the coupling block.
    pub coupling_quadrature: CouplingQuadrature,

    /// Direct solver backend.
    pub linear_solver: LinearSolverKind,

    /// Solve once with zero velocity before the first step so the t=0
    /// snapshot carries the curvature of the initial interface.
    pub compute_initial_curvature: bool,

    /// Upper bound on the number of steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_steps: Option<u64>,

    /// Largest accepted relative residual `|b − Ax| / |b|` of a solve.
    pub max_relative_residual: f64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            use_mean_curvature_flow: false,
            end_time: DEFAULT_END_TIME,
            time_step: DEFAULT_TIME_STEP,
            create_stationary_interface: false,
            stationary_tolerance: DEFAULT_STATIONARY_TOLERANCE,
            coupling_quadrature: CouplingQuadrature::default(),
            linear_solver: LinearSolverKind::default(),
            compute_initial_curvature: false,
            max_steps: None,
            max_relative_residual: 1e-8,
        }
    }
}

impl EvolutionConfig {
    /// Mean curvature flow up to `end_time`.
    pub fn mean_curvature_flow(end_time: f64, time_step: f64) -> Self {
        Self {
            use_mean_curvature_flow: true,
            end_time,
            time_step,
            ..Default::default()
        }
    }

    /// Surface diffusion up to `end_time`.
    pub fn surface_diffusion(end_time: f64, time_step: f64) -> Self {
        Self {
            use_mean_curvature_flow: false,
            end_time,
            time_step,
            ..Default::default()
        }
    }

    /// Surface diffusion run to a stationary shape, capped at `max_steps`.
    pub fn until_stationary(time_step: f64, max_steps: u64) -> Self {
        Self {
            time_step,
            create_stationary_interface: true,
            max_steps: Some(max_steps),
            ..Default::default()
        }
    }

    /// Selected flow law.
    pub fn flow_law(&self) -> FlowLaw {
        FlowLaw::from_mean_curvature_flag(self.use_mean_curvature_flow)
    }

    /// Checks parameter consistency.
    pub fn validate(&self) -> MeniscusResult<()> {
        if !(self.time_step > 0.0 && self.time_step.is_finite()) {
            return Err(MeniscusError::InvalidConfig(format!(
                "time_step must be positive and finite, got {}",
                self.time_step
            )));
        }
        if !self.end_time.is_finite() || self.end_time < 0.0 {
            return Err(MeniscusError::InvalidConfig(format!(
                "end_time must be finite and non-negative, got {}",
                self.end_time
            )));
        }
        if !(self.stationary_tolerance >= 0.0 && self.stationary_tolerance.is_finite()) {
            return Err(MeniscusError::InvalidConfig(format!(
                "stationary_tolerance must be finite and non-negative, got {}",
                self.stationary_tolerance
            )));
        }
        if !(self.max_relative_residual > 0.0) {
            return Err(MeniscusError::InvalidConfig(format!(
                "max_relative_residual must be positive, got {}",
                self.max_relative_residual
            )));
        }
        if self.max_steps == Some(0) {
            return Err(MeniscusError::InvalidConfig(
                "max_steps must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
