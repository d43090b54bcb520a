//! # meniscus-solver
//!
//! Time integration of closed interfaces under mean curvature flow or
//! surface diffusion.
//!
//! ## Architecture
//!
//! ```text
//! EvolutionDriver::run
//!   └─ per step:
//!        InterfaceOperator::assemble(mesh, Δt)   [A_curv −Nᵀ; N A]
//!        InterfaceRhs::assemble(&operator, mesh) (0, −A X)
//!        SparseSolver::factorize + solve         (κ, ΔX)
//!        stationarity check, mesh ← mesh + ΔX
//!        EvolutionObserver::on_snapshot
//! ```

pub mod config;
pub mod driver;
pub mod flow;
pub mod observer;
pub mod operator;
pub mod rhs;
pub mod time;

pub use config::EvolutionConfig;
pub use driver::{EvolutionDriver, EvolutionReport, EvolutionState};
pub use flow::{CouplingQuadrature, FlowLaw, MotionMode};
pub use observer::{EvolutionObserver, NullObserver, ObserverChain, StepSnapshot, TelemetryObserver};
pub use operator::InterfaceOperator;
pub use rhs::InterfaceRhs;
pub use time::FixedStepTimeProvider;
