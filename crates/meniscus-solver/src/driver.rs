//! Evolution driver — the time-stepping state machine.
//!
//! ```text
//! Init ──► Stepping ──► Stationary
//!                  ├──► TimeLimitReached
//!                  └──► StepLimitReached
//! ```
//!
//! Each step clears the solution, assembles operator and right-hand side
//! on the current geometry, solves, optionally checks stationarity, and
//! only then moves the mesh. A failing step leaves the mesh untouched.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use meniscus_fem::{CombinedSpace, DiscreteFunction};
use meniscus_math::{CsrMatrix, SparseSolver};
use meniscus_mesh::{InterfaceMesh, Topology};
use meniscus_types::constants::END_TIME_SLACK;
use meniscus_types::{MeniscusError, MeniscusResult};

use crate::config::EvolutionConfig;
use crate::flow::MotionMode;
use crate::observer::{EvolutionObserver, StepSnapshot};
use crate::operator::InterfaceOperator;
use crate::rhs::InterfaceRhs;
use crate::time::FixedStepTimeProvider;

/// Driver state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvolutionState {
    Init,
    Stepping,
    /// A step produced a displacement below the stationarity tolerance.
    Stationary,
    /// The time bound was passed and no stationarity run was requested.
    TimeLimitReached,
    /// `max_steps` steps were taken.
    StepLimitReached,
}

impl EvolutionState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            EvolutionState::Stationary
                | EvolutionState::TimeLimitReached
                | EvolutionState::StepLimitReached
        )
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionReport {
    pub final_state: EvolutionState,
    /// Steps taken (the initial state is not counted).
    pub steps: u64,
    /// Time of the last snapshot.
    pub final_time: f64,
    /// Largest absolute displacement component of the last step.
    pub last_max_displacement: f64,
    /// Wall-clock time of the whole run (seconds).
    pub wall_time: f64,
}

/// Runs one interface evolution.
pub struct EvolutionDriver {
    config: EvolutionConfig,
    state: EvolutionState,
}

impl EvolutionDriver {
    /// Creates a driver. Fails if the configuration is inconsistent.
    pub fn new(config: EvolutionConfig) -> MeniscusResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: EvolutionState::Init,
        })
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn state(&self) -> EvolutionState {
        self.state
    }

    /// Evolves `mesh` in place until a terminal state is reached.
    pub fn run(
        &mut self,
        mesh: &mut InterfaceMesh,
        observer: &mut dyn EvolutionObserver,
    ) -> MeniscusResult<EvolutionReport> {
        let run_start = Instant::now();
        self.state = EvolutionState::Init;

        let config = &self.config;
        let space = CombinedSpace::from_mesh(mesh)?;

        let topology = Topology::build(mesh);
        if !topology.is_closed() {
            tracing::warn!(
                boundary_facets = topology.boundary_facet_count(),
                "interface is not closed"
            );
        }
        if !topology.is_consistently_oriented() {
            tracing::warn!("interface orientation is inconsistent; normals will not be outward");
        }

        tracing::info!(
            problem = config.flow_law().name(),
            coupling = ?config.coupling_quadrature,
            solver = config.linear_solver.name(),
            "starting interface evolution"
        );
        tracing::info!(
            curvature_dofs = space.curvature_size(),
            displacement_dofs = space.displacement_size(),
            "solving for {} curvature and {} position unknowns",
            space.curvature_size(),
            space.displacement_size()
        );
        if config.create_stationary_interface {
            tracing::warn!("the run continues until the interface is stationary");
        }

        let mut operator =
            InterfaceOperator::new(space, config.flow_law(), config.coupling_quadrature)?;
        let mut rhs = InterfaceRhs::new(space);
        let mut solution = DiscreteFunction::new(space);
        let mut solver = config.linear_solver.build();
        let mut time = FixedStepTimeProvider::new(0.0, config.time_step)?;

        observer.on_run_begin(mesh, config)?;

        let mut rhs_norm = 0.0;
        if config.compute_initial_curvature {
            let init_start = Instant::now();
            operator.assemble(mesh, MotionMode::ZeroVelocity)?;
            rhs.assemble(&operator, mesh)?;
            rhs_norm = rhs.norm();
            let residual = solve_system(
                solver.as_mut(),
                operator.matrix()?,
                rhs.rhs(),
                &mut solution,
                config.max_relative_residual,
            )?;
            observer.on_linear_solve(0, solver.name(), space.size(), rhs_norm, residual);
            tracing::debug!(
                relative_residual = residual,
                elapsed = init_start.elapsed().as_secs_f64(),
                "initial curvature computed"
            );
        }

        observer.on_snapshot(&StepSnapshot {
            step: 0,
            time: time.time(),
            mesh,
            solution: &solution,
            stationary: false,
            rhs_norm,
            wall_time: 0.0,
        })?;
        let mut last_time = time.time();
        let mut last_max_displacement = 0.0;
        let mut steps = 0u64;
        time.next();

        self.state = EvolutionState::Stepping;
        let end_time = config.end_time + END_TIME_SLACK * config.time_step;

        let final_state = loop {
            if time.time() > end_time && !config.create_stationary_interface {
                break EvolutionState::TimeLimitReached;
            }
            if config.max_steps.is_some_and(|max| steps >= max) {
                break EvolutionState::StepLimitReached;
            }

            let step = time.step();
            let step_start = Instant::now();
            tracing::info!(step, time = time.time(), "time step");
            observer.on_step_begin(step, time.time(), time.time_step());

            solution.clear();
            operator.assemble(mesh, MotionMode::Evolving { time_step: time.time_step() })?;
            rhs.assemble(&operator, mesh)?;
            rhs_norm = rhs.norm();
            let residual = solve_system(
                solver.as_mut(),
                operator.matrix()?,
                rhs.rhs(),
                &mut solution,
                config.max_relative_residual,
            )?;
            observer.on_linear_solve(step, solver.name(), space.size(), rhs_norm, residual);

            last_max_displacement = max_abs(solution.displacement());
            let stationary = if config.create_stationary_interface {
                let stationary = is_stationary(solution.displacement(), config.stationary_tolerance);
                observer.on_stationarity(
                    step,
                    last_max_displacement,
                    config.stationary_tolerance,
                    stationary,
                );
                if stationary {
                    tracing::info!("interface is stationary");
                } else {
                    tracing::debug!(max_displacement = last_max_displacement, "interface is not stationary");
                }
                stationary
            } else {
                false
            };

            mesh.apply_displacement(solution.displacement())?;
            steps += 1;

            let wall_time = step_start.elapsed().as_secs_f64();
            tracing::info!(
                elapsed = wall_time,
                "time elapsed for assembling and solving: {wall_time:.6} seconds"
            );
            observer.on_snapshot(&StepSnapshot {
                step,
                time: time.time(),
                mesh,
                solution: &solution,
                stationary,
                rhs_norm,
                wall_time,
            })?;
            last_time = time.time();

            if stationary {
                break EvolutionState::Stationary;
            }
            time.next();
        };

        self.state = final_state;
        let report = EvolutionReport {
            final_state,
            steps,
            final_time: last_time,
            last_max_displacement,
            wall_time: run_start.elapsed().as_secs_f64(),
        };
        tracing::info!(
            state = ?report.final_state,
            steps = report.steps,
            final_time = report.final_time,
            "total running time: {:.6} seconds",
            report.wall_time
        );
        observer.on_run_end(&report)?;
        Ok(report)
    }
}

/// Factorizes and solves, then checks the residual.
///
/// Returns the relative residual `|b − Ax| / |b|` (absolute when `b = 0`).
fn solve_system(
    solver: &mut dyn SparseSolver,
    matrix: &CsrMatrix,
    rhs: &[f64],
    solution: &mut DiscreteFunction,
    max_relative_residual: f64,
) -> MeniscusResult<f64> {
    solver
        .factorize(matrix)
        .map_err(MeniscusError::SolverFailure)?;
    solver
        .solve(rhs, solution.dofs_mut())
        .map_err(MeniscusError::SolverFailure)?;

    let residual = matrix.residual_norm(solution.dofs(), rhs)?;
    let rhs_norm = rhs.iter().map(|x| x * x).sum::<f64>().sqrt();
    let relative = if rhs_norm > 0.0 { residual / rhs_norm } else { residual };
    if !(relative <= max_relative_residual) {
        return Err(MeniscusError::SolverFailure(format!(
            "{}: relative residual {relative:.3e} exceeds {max_relative_residual:.3e}",
            solver.name()
        )));
    }
    Ok(relative)
}

/// True if every displacement component satisfies `|v| ≤ tolerance`.
///
/// The tolerance is absolute; non-finite entries are never stationary.
pub fn is_stationary(displacement: &[f64], tolerance: f64) -> bool {
    displacement.iter().all(|v| v.abs() <= tolerance)
}

/// Largest absolute entry, `0.0` for an empty slice.
pub fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |m, v| m.max(v.abs()))
}
