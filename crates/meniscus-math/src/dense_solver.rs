//! Dense partial-pivoting LU solver backed by `faer`.
//!
//! Densifies the CSR matrix. Only suitable for small meshes, where it
//! serves as a reference to cross-check the sparse solver.

use faer::linalg::solvers::{PartialPivLu, Solve};

use crate::sparse::{check_finite, check_lengths, check_square, CsrMatrix, SparseSolver};

/// Dense LU solver.
pub struct DenseLuSolver {
    factorization: Option<PartialPivLu<f64>>,
    dimension: usize,
}

impl DenseLuSolver {
    /// Creates a new solver (unfactorized).
    pub fn new() -> Self {
        Self {
            factorization: None,
            dimension: 0,
        }
    }
}

impl Default for DenseLuSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SparseSolver for DenseLuSolver {
    fn factorize(&mut self, matrix: &CsrMatrix) -> Result<(), String> {
        check_square(matrix)?;
        let n = matrix.rows;
        self.dimension = n;

        let mut dense = vec![0.0; n * n];
        for row in 0..n {
            for (col, val) in matrix.row_entries(row) {
                dense[row * n + col] = val;
            }
        }
        let mat = faer::Mat::from_fn(n, n, |i, j| dense[i * n + j]);
        self.factorization = Some(mat.partial_piv_lu());
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
        "faer_dense_lu"
    }
}
