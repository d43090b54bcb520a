//! Runtime strategies selecting the flow law and coupling quadrature.

use serde::{Deserialize, Serialize};

/// Geometric evolution law.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowLaw {
    /// Normal velocity equals curvature: `V = κ`.
    /// Curvature block is the Δt-scaled mass matrix.
    MeanCurvatureFlow,
    /// Normal velocity equals the surface Laplacian of curvature:
    /// `V = −Δ_Γ κ`. Curvature block is the Δt-scaled stiffness matrix.
    SurfaceDiffusion,
}

impl FlowLaw {
    pub fn from_mean_curvature_flag(use_mean_curvature_flow: bool) -> Self {
        if use_mean_curvature_flow {
            FlowLaw::MeanCurvatureFlow
        } else {
            FlowLaw::SurfaceDiffusion
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FlowLaw::MeanCurvatureFlow => "mean curvature flow",
            FlowLaw::SurfaceDiffusion => "surface diffusion",
        }
    }
}

/// Points used to integrate the curvature/displacement coupling block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouplingQuadrature {
    /// Gauss points of order `2p + 1`, normal sampled at each point.
    Gauss,
    /// Vertex (Lagrange) points with weight `reference_volume / n_points`.
    #[default]
    Lagrange,
}

/// How the curvature block is scaled during assembly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionMode {
    /// Regular step with time increment `time_step`.
    Evolving { time_step: f64 },
    /// The curvature block is left out, so the solve yields the curvature
    /// of the current geometry without motion in normal direction.
    ZeroVelocity,
}

impl MotionMode {
    /// Scale applied to the curvature block.
    pub fn time_scale(&self) -> f64 {
        match *self {
            MotionMode::Evolving { time_step } => time_step,
            MotionMode::ZeroVelocity => 0.0,
        }
    }
}
