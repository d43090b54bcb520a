//! Sparse LU solver backed by `faer`.
//!
//! Implements the [`SparseSolver`] trait using faer's sparse LU with
//! partial pivoting. The interface system is a saddle-point matrix
//! (antisymmetric coupling blocks, a curvature block that may vanish), so
//! Cholesky is not applicable.
//!
//! ## Workflow
//! 1. `factorize(matrix)` — converts CSR→CSC, symbolic + numeric LU
//! 2. `solve(rhs, solution)` — forward/backward substitution
//!
//! The matrix changes every time step, so each step factorizes once and
//! solves once.

use faer::linalg::solvers::Solve;
use faer::sparse::linalg::solvers::{Lu, SymbolicLu};
use faer::sparse::{SparseColMat, Triplet};

use crate::sparse::{check_finite, check_lengths, check_square, CsrMatrix, SparseSolver};

/// Sparse LU solver using `faer`.
pub struct FaerLuSolver {
    /// Cached LU factorization.
    factorization: Option<Lu<usize, f64>>,
    /// Matrix dimension (N×N).
    dimension: usize,
}

impl FaerLuSolver {
    /// Creates a new solver (unfactorized).
    pub fn new() -> Self {
        Self {
            factorization: None,
            dimension: 0,
        }
    }

    /// Convert our CSR matrix to faer's CSC matrix.
    ///
    /// Explicit zeros of the reserved pattern are dropped; they carry no
    /// information for the factorization.
    fn csr_to_csc(matrix: &CsrMatrix) -> Result<SparseColMat<usize, f64>, String> {
        let mut triplets: Vec<Triplet<usize, usize, f64>> = Vec::with_capacity(matrix.nnz());
        for row in 0..matrix.rows {
            for (col, val) in matrix.row_entries(row) {
                if val != 0.0 {
                    triplets.push(Triplet { row, col, val });
                }
            }
        }

        SparseColMat::try_new_from_triplets(matrix.rows, matrix.cols, &triplets)
            .map_err(|e| format!("Failed to construct faer CSC matrix: {e:?}"))
    }
}

impl Default for FaerLuSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SparseSolver for FaerLuSolver {
    fn factorize(&mut self, matrix: &CsrMatrix) -> Result<(), String> {
        check_square(matrix)?;
        self.factorization = None;
        self.dimension = matrix.rows;

        let csc = Self::csr_to_csc(matrix)?;

        // Symbolic analysis (column ordering, fill-in prediction)
        let symbolic = SymbolicLu::try_new(csc.symbolic())
            .map_err(|e| format!("Symbolic LU analysis failed: {e:?}"))?;

        // Numeric factorization with the symbolic structure
        let lu = Lu::try_new_with_symbolic(symbolic, csc.as_ref())
            .map_err(|e| format!("LU factorization failed: {e:?}"))?;

        self.factorization = Some(lu);
        Ok(())
    }

    fn solve(&self, rhs: &[f64], solution: &mut [f64]) -> Result<(), String> {
        let lu = self
            .factorization
            .as_ref()
            .ok_or_else(|| "Solver not factorized. Call factorize() first.".to_string())?;
        check_lengths(self.dimension, rhs, solution)?;

        let rhs_col: faer::Mat<f64> = faer::Mat::from_fn(self.dimension, 1, |i, _| rhs[i]);
        let sol = lu.solve(&rhs_col);

        for (i, out) in solution.iter_mut().enumerate() {
            *out = sol[(i, 0)];
        }
        check_finite(solution)
    }

    fn is_factorized(&self) -> bool {
        self.factorization.is_some()
    }

    fn name(&self) -> &str {
        "faer_sparse_lu"
    }
}
