//! # meniscus-math
//!
//! Linear algebra primitives for the meniscus interface evolution engine.
//!
//! Provides:
//! - Re-exports of `glam` double-precision types (`DVec2`, `DVec3`)
//! - CSR matrix with a reserved sparsity pattern, filled per element
//! - The [`LinearOperator`](sparse::LinearOperator) forward-apply seam
//! - The [`SparseSolver`](sparse::SparseSolver) trait with faer-backed
//!   sparse and dense LU implementations, selected at runtime by
//!   [`LinearSolverKind`]

pub mod dense_solver;
pub mod faer_solver;
pub mod kind;
pub mod sparse;

pub use glam::{DVec2, DVec3};
pub use kind::LinearSolverKind;
pub use sparse::{CsrMatrix, LinearOperator, SparseSolver};
