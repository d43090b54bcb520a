//! Runtime selection of the direct solver.

use serde::{Deserialize, Serialize};

use crate::dense_solver::DenseLuSolver;
use crate::faer_solver::FaerLuSolver;
use crate::sparse::SparseSolver;

/// Which direct solver the evolution uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinearSolverKind {
    /// faer sparse LU (default).
    #[default]
    SparseLu,
    /// faer dense partial-pivoting LU.
    DenseLu,
}

impl LinearSolverKind {
    /// Instantiates the solver.
    pub fn build(self) -> Box<dyn SparseSolver> {
        match self {
            LinearSolverKind::SparseLu => Box::new(FaerLuSolver::new()),
            LinearSolverKind::DenseLu => Box::new(DenseLuSolver::new()),
        }
    }

    /// Returns a human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            LinearSolverKind::SparseLu => "sparse_lu",
            LinearSolverKind::DenseLu => "dense_lu",
        }
    }
}
