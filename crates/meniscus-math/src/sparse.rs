//! Sparse matrix representation and solver interface.
//!
//! [`CsrMatrix`] is built once from a sparsity pattern and then refilled
//! in place: `clear()` zeroes the values, `add()` accumulates into an
//! existing entry. Writing outside the reserved pattern is an error, so
//! the pattern must be reserved before assembly starts.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use meniscus_types::{MeniscusError, MeniscusResult};

/// Compressed Sparse Row (CSR) matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsrMatrix {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// Row pointer array (length = rows + 1).
    /// `row_ptr[i]..row_ptr[i+1]` are the indices into `col_idx` and `values`
    /// for non-zeros in row `i`.
    pub row_ptr: Vec<usize>,
    /// Column indices of stored entries, sorted within each row.
    pub col_idx: Vec<usize>,
    /// Stored values.
    pub values: Vec<f64>,
}

impl CsrMatrix {
    /// Creates an empty CSR matrix with the given dimensions.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            row_ptr: vec![0; rows + 1],
            col_idx: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Returns the number of stored entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Creates a zero-valued matrix whose stored entries are exactly
    /// `pattern[row]` for every row.
    ///
    /// Column lists may be unsorted and contain duplicates.
    pub fn from_pattern(rows: usize, cols: usize, pattern: &[Vec<usize>]) -> MeniscusResult<Self> {
        if pattern.len() != rows {
            return Err(MeniscusError::DimensionMismatch {
                context: "sparsity pattern rows",
                expected: rows,
                found: pattern.len(),
            });
        }

        let mut row_ptr = Vec::with_capacity(rows + 1);
        let mut col_idx = Vec::new();
        row_ptr.push(0);

        for row_cols in pattern {
            let mut sorted = row_cols.clone();
            sorted.sort_unstable();
            sorted.dedup();
            if let Some(&last) = sorted.last() {
                if last >= cols {
                    return Err(MeniscusError::Precondition(format!(
                        "pattern column {last} out of range (cols: {cols})"
                    )));
                }
            }
            col_idx.extend_from_slice(&sorted);
            row_ptr.push(col_idx.len());
        }

        let nnz = col_idx.len();
        Ok(Self {
            rows,
            cols,
            row_ptr,
            col_idx,
            values: vec![0.0; nnz],
        })
    }

    /// Creates a CSR matrix from triplets (row, col, value).
    ///
    /// Duplicate entries are summed.
    pub fn from_triplets(rows: usize, cols: usize, triplets: &[(usize, usize, f64)]) -> MeniscusResult<Self> {
        let mut pattern = vec![Vec::new(); rows];
        for &(r, c, _) in triplets {
            if r >= rows {
                return Err(MeniscusError::Precondition(format!(
                    "triplet row {r} out of range (rows: {rows})"
                )));
            }
            pattern[r].push(c);
        }
        let mut matrix = Self::from_pattern(rows, cols, &pattern)?;
        for &(r, c, v) in triplets {
            matrix.add(r, c, v)?;
        }
        Ok(matrix)
    }

    /// Zeroes every stored value, keeping the pattern.
    pub fn clear(&mut self) {
        self.values.fill(0.0);
    }

    /// Position of `(row, col)` in `values`, if the entry is stored.
    #[inline]
    fn position(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.rows {
            return None;
        }
        let start = self.row_ptr[row];
        let end = self.row_ptr[row + 1];
        self.col_idx[start..end]
            .binary_search(&col)
            .ok()
            .map(|offset| start + offset)
    }

    /// Accumulates `value` into entry `(row, col)`.
    ///
    /// Fails if the entry lies outside the reserved pattern.
    #[inline]
    pub fn add(&mut self, row: usize, col: usize, value: f64) -> MeniscusResult<()> {
        match self.position(row, col) {
            Some(pos) => {
                self.values[pos] += value;
                Ok(())
            }
            None => Err(MeniscusError::Precondition(format!(
                "entry ({row}, {col}) is outside the reserved sparsity pattern"
            ))),
        }
    }

    /// Returns entry `(row, col)`, or zero if it is not stored.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.position(row, col).map_or(0.0, |pos| self.values[pos])
    }

    /// Returns true if `(row, col)` is part of the pattern.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.position(row, col).is_some()
    }

    /// Iterates over `(col, value)` of the stored entries of `row`.
    pub fn row_entries(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let range = self.row_ptr[row]..self.row_ptr[row + 1];
        self.col_idx[range.clone()]
            .iter()
            .copied()
            .zip(self.values[range].iter().copied())
    }

    /// Computes `y = A x`.
    pub fn mul_vec(&self, x: &[f64], y: &mut [f64]) -> MeniscusResult<()> {
        if x.len() != self.cols {
            return Err(MeniscusError::DimensionMismatch {
                context: "matrix-vector product input",
                expected: self.cols,
                found: x.len(),
            });
        }
        if y.len() != self.rows {
            return Err(MeniscusError::DimensionMismatch {
                context: "matrix-vector product output",
                expected: self.rows,
                found: y.len(),
            });
        }

        for (row, out) in y.iter_mut().enumerate() {
            let mut sum = 0.0;
            for idx in self.row_ptr[row]..self.row_ptr[row + 1] {
                sum += self.values[idx] * x[self.col_idx[idx]];
            }
            *out = sum;
        }
        Ok(())
    }

    /// Euclidean norm of the residual `b - A x`.
    pub fn residual_norm(&self, x: &[f64], b: &[f64]) -> MeniscusResult<f64> {
        let mut ax = vec![0.0; self.rows];
        self.mul_vec(x, &mut ax)?;
        Ok(b.iter()
            .zip(&ax)
            .map(|(bi, axi)| (bi - axi) * (bi - axi))
            .sum::<f64>()
            .sqrt())
    }

    /// Dumps the stored entries as `row col value` lines (1-based indices,
    /// Matrix Market coordinate order).
    pub fn to_triplet_string(&self) -> String {
        let mut out = String::new();
        for row in 0..self.rows {
            for (col, val) in self.row_entries(row) {
                let _ = writeln!(out, "{} {} {:.16e}", row + 1, col + 1, val);
            }
        }
        out
    }
}

/// A linear map `w = M u` over flat coefficient vectors.
///
/// Used as the forward operator by the right-hand-side builder.
pub trait LinearOperator {
    /// Computes `w = M u`.
    fn apply(&self, u: &[f64], w: &mut [f64]) -> MeniscusResult<()>;

    /// Dimension of the (square) operator.
    fn dimension(&self) -> usize;
}

impl LinearOperator for CsrMatrix {
    fn apply(&self, u: &[f64], w: &mut [f64]) -> MeniscusResult<()> {
        self.mul_vec(u, w)
    }

    fn dimension(&self) -> usize {
        self.rows
    }
}

/// Trait for direct solvers of general (non-symmetric) sparse systems.
///
/// Implementations: [`FaerLuSolver`](crate::faer_solver::FaerLuSolver),
/// [`DenseLuSolver`](crate::dense_solver::DenseLuSolver).
pub trait SparseSolver {
    /// Factorize the matrix. Call after every change of the values.
    fn factorize(&mut self, matrix: &CsrMatrix) -> Result<(), String>;

    /// Solve Ax = b using the pre-computed factorization.
    /// Returns x in the provided output buffer.
    fn solve(&self, rhs: &[f64], solution: &mut [f64]) -> Result<(), String>;

    /// Returns true if the solver holds a valid factorization.
    fn is_factorized(&self) -> bool;

    /// Returns the solver's name.
    fn name(&self) -> &str;
}

/// Checks that `solution` contains only finite values.
///
/// LU backends report structural singularity themselves, but a numerically
/// singular pivot shows up as inf/NaN in the solution.
pub(crate) fn check_finite(solution: &[f64]) -> Result<(), String> {
    match solution.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(format!(
            "solution entry {i} is not finite; the system matrix is singular or ill-conditioned"
        )),
        None => Ok(()),
    }
}

/// Checks the buffer lengths shared by every solver implementation.
pub(crate) fn check_lengths(dimension: usize, rhs: &[f64], solution: &[f64]) -> Result<(), String> {
    if rhs.len() != dimension {
        return Err(format!(
            "RHS length ({}) != matrix dimension ({})",
            rhs.len(),
            dimension
        ));
    }
    if solution.len() != dimension {
        return Err(format!(
            "Solution length ({}) != matrix dimension ({})",
            solution.len(),
            dimension
        ));
    }
    Ok(())
}

/// Checks that a matrix can be handed to a factorization.
pub(crate) fn check_square(matrix: &CsrMatrix) -> Result<(), String> {
    if matrix.rows != matrix.cols {
        return Err(format!(
            "Matrix must be square, got {}×{}",
            matrix.rows, matrix.cols
        ));
    }
    if matrix.rows == 0 {
        return Err("Cannot factorize empty matrix".into());
    }
    Ok(())
}
