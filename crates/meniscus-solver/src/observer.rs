//! Per-step observation of an evolution run.
//!
//! Observers are called by the driver at fixed points and may record
//! snapshots, diagnostics or telemetry. They never modify the run.
//!
//! # Lifecycle
//!
//! ```text
//! observer.on_run_begin(...)
//! observer.on_snapshot(step 0)
//! for each step:
//!   observer.on_step_begin(...)
//!   observer.on_linear_solve(...)
//!   observer.on_stationarity(...)      (stationarity check enabled)
//!   observer.on_snapshot(...)
//! observer.on_run_end(...)
//! ```

use meniscus_fem::DiscreteFunction;
use meniscus_mesh::{InterfaceMesh, InterfaceStatistics};
use meniscus_telemetry::{EventBus, EventKind, EvolutionEvent};
use meniscus_types::MeniscusResult;

use crate::config::EvolutionConfig;
use crate::driver::EvolutionReport;

/// State after a completed step (or the initial state, step 0).
pub struct StepSnapshot<'a> {
    pub step: u64,
    pub time: f64,
    /// Mesh after the coordinate update.
    pub mesh: &'a InterfaceMesh,
    /// Curvature and displacement of the step.
    pub solution: &'a DiscreteFunction,
    pub stationary: bool,
    pub rhs_norm: f64,
    /// Wall-clock time for assembling and solving (seconds).
    pub wall_time: f64,
}

/// Callbacks invoked by [`EvolutionDriver::run`](crate::EvolutionDriver::run).
pub trait EvolutionObserver {
    fn on_run_begin(&mut self, mesh: &InterfaceMesh, config: &EvolutionConfig) -> MeniscusResult<()> {
        let _ = (mesh, config);
        Ok(())
    }

    fn on_step_begin(&mut self, step: u64, time: f64, time_step: f64) {
        let _ = (step, time, time_step);
    }

    fn on_linear_solve(
        &mut self,
        step: u64,
        solver: &str,
        dofs: usize,
        rhs_norm: f64,
        relative_residual: f64,
    ) {
        let _ = (step, solver, dofs, rhs_norm, relative_residual);
    }

    fn on_stationarity(&mut self, step: u64, max_displacement: f64, tolerance: f64, stationary: bool) {
        let _ = (step, max_displacement, tolerance, stationary);
    }

    fn on_snapshot(&mut self, snapshot: &StepSnapshot<'_>) -> MeniscusResult<()> {
        let _ = snapshot;
        Ok(())
    }

    fn on_run_end(&mut self, report: &EvolutionReport) -> MeniscusResult<()> {
        let _ = report;
        Ok(())
    }

    fn name(&self) -> &str;
}

/// Observer that ignores everything.
#[derive(Debug, Default)]
pub struct NullObserver;

impl EvolutionObserver for NullObserver {
    fn name(&self) -> &str {
        "null_observer"
    }
}

/// Forwards every callback to a list of observers, in order.
#[derive(Default)]
pub struct ObserverChain {
    observers: Vec<Box<dyn EvolutionObserver>>,
}

impl ObserverChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, observer: Box<dyn EvolutionObserver>) {
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl EvolutionObserver for ObserverChain {
    fn on_run_begin(&mut self, mesh: &InterfaceMesh, config: &EvolutionConfig) -> MeniscusResult<()> {
        for o in &mut self.observers {
            o.on_run_begin(mesh, config)?;
        }
        Ok(())
    }

    fn on_step_begin(&mut self, step: u64, time: f64, time_step: f64) {
        for o in &mut self.observers {
            o.on_step_begin(step, time, time_step);
        }
    }

    fn on_linear_solve(
        &mut self,
        step: u64,
        solver: &str,
        dofs: usize,
        rhs_norm: f64,
        relative_residual: f64,
    ) {
        for o in &mut self.observers {
            o.on_linear_solve(step, solver, dofs, rhs_norm, relative_residual);
        }
    }

    fn on_stationarity(&mut self, step: u64, max_displacement: f64, tolerance: f64, stationary: bool) {
        for o in &mut self.observers {
            o.on_stationarity(step, max_displacement, tolerance, stationary);
        }
    }

    fn on_snapshot(&mut self, snapshot: &StepSnapshot<'_>) -> MeniscusResult<()> {
        for o in &mut self.observers {
            o.on_snapshot(snapshot)?;
        }
        Ok(())
    }

    fn on_run_end(&mut self, report: &EvolutionReport) -> MeniscusResult<()> {
        for o in &mut self.observers {
            o.on_run_end(report)?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "observer_chain"
    }
}

/// Observer that bridges to the telemetry event bus.
///
/// Translates driver callbacks into [`EvolutionEvent`]s and flushes the
/// bus after every snapshot.
pub struct TelemetryObserver {
    bus: EventBus,
}

impl TelemetryObserver {
    pub fn new(bus: EventBus) -> Self {
        Self { bus }
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    pub fn into_bus(self) -> EventBus {
        self.bus
    }
}

impl Default for TelemetryObserver {
    fn default() -> Self {
        Self::new(EventBus::new())
    }
}

impl EvolutionObserver for TelemetryObserver {
    fn on_step_begin(&mut self, step: u64, time: f64, time_step: f64) {
        self.bus
            .emit(EvolutionEvent::new(step, EventKind::StepBegin { time, time_step }));
    }

    fn on_linear_solve(
        &mut self,
        step: u64,
        solver: &str,
        dofs: usize,
        rhs_norm: f64,
        relative_residual: f64,
    ) {
        self.bus.emit(EvolutionEvent::new(
            step,
            EventKind::LinearSolve {
                solver: solver.to_string(),
                dofs,
                rhs_norm,
                relative_residual,
            },
        ));
    }

    fn on_stationarity(&mut self, step: u64, max_displacement: f64, tolerance: f64, stationary: bool) {
        self.bus.emit(EvolutionEvent::new(
            step,
            EventKind::Stationarity {
                max_displacement,
                tolerance,
                stationary,
            },
        ));
    }

    fn on_snapshot(&mut self, snapshot: &StepSnapshot<'_>) -> MeniscusResult<()> {
        let stats = InterfaceStatistics::compute(snapshot.mesh);
        self.bus.emit(EvolutionEvent::new(
            snapshot.step,
            EventKind::Geometry {
                measure: stats.measure,
                enclosed_volume: stats.enclosed_volume,
                average_radius: stats.average_radius,
            },
        ));
        if snapshot.step > 0 {
            self.bus.emit(EvolutionEvent::new(
                snapshot.step,
                EventKind::StepEnd {
                    wall_time: snapshot.wall_time,
                },
            ));
        }
        self.bus.flush();
        Ok(())
    }

    fn on_run_end(&mut self, _report: &EvolutionReport) -> MeniscusResult<()> {
        self.bus.finish();
        Ok(())
    }

    fn name(&self) -> &str {
        "telemetry_observer"
    }
}
