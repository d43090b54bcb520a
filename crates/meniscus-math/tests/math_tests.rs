//! Integration tests for meniscus-math.

use meniscus_math::dense_solver::DenseLuSolver;
use meniscus_math::faer_solver::FaerLuSolver;
use meniscus_math::{CsrMatrix, LinearOperator, LinearSolverKind, SparseSolver};

// ─── CsrMatrix Tests ──────────────────────────────────────────

fn tridiagonal_pattern(n: usize) -> Vec<Vec<usize>> {
    (0..n)
        .map(|i| {
            let mut cols = vec![i];
            if i > 0 {
                cols.push(i - 1);
            }
            if i + 1 < n {
                cols.push(i + 1);
            }
            cols
        })
        .collect()
}

#[test]
fn pattern_is_sorted_and_deduplicated() {
    let m = CsrMatrix::from_pattern(2, 3, &[vec![2, 0, 2], vec![1]]).unwrap();
    assert_eq!(m.nnz(), 3);
    assert!(m.contains(0, 0));
    assert!(m.contains(0, 2));
    assert!(!m.contains(0, 1));
    assert_eq!(m.row_entries(0).map(|(c, _)| c).collect::<Vec<_>>(), vec![0, 2]);
}

#[test]
fn pattern_rejects_out_of_range_column() {
    assert!(CsrMatrix::from_pattern(2, 2, &[vec![0], vec![5]]).is_err());
}

#[test]
fn add_accumulates_and_clear_keeps_pattern() {
    let mut m = CsrMatrix::from_pattern(3, 3, &tridiagonal_pattern(3)).unwrap();
    m.add(1, 1, 2.0).unwrap();
    m.add(1, 1, 0.5).unwrap();
    m.add(1, 0, -1.0).unwrap();
    assert_eq!(m.get(1, 1), 2.5);
    assert_eq!(m.get(1, 0), -1.0);

    m.clear();
    assert_eq!(m.get(1, 1), 0.0);
    assert_eq!(m.nnz(), 7);
    assert!(m.contains(1, 0));
}

#[test]
fn add_outside_pattern_is_an_error() {
    let mut m = CsrMatrix::from_pattern(3, 3, &tridiagonal_pattern(3)).unwrap();
    assert!(m.add(0, 2, 1.0).is_err());
    assert_eq!(m.get(0, 2), 0.0);
}

#[test]
fn from_triplets_sums_duplicates() {
    let m = CsrMatrix::from_triplets(2, 2, &[(0, 0, 1.0), (0, 0, 2.0), (1, 0, 4.0)]).unwrap();
    assert_eq!(m.get(0, 0), 3.0);
    assert_eq!(m.get(1, 0), 4.0);
    assert_eq!(m.nnz(), 2);
}

#[test]
fn mul_vec_matches_hand_computation() {
    let m = CsrMatrix::from_triplets(
        2,
        3,
        &[(0, 0, 1.0), (0, 2, 2.0), (1, 1, -3.0)],
    )
    .unwrap();
    let mut y = vec![0.0; 2];
    m.mul_vec(&[1.0, 2.0, 3.0], &mut y).unwrap();
    assert_eq!(y, vec![7.0, -6.0]);
}

#[test]
fn mul_vec_rejects_wrong_lengths() {
    let m = CsrMatrix::from_triplets(2, 2, &[(0, 0, 1.0)]).unwrap();
    let mut y = vec![0.0; 2];
    assert!(m.mul_vec(&[1.0], &mut y).is_err());
    let mut short = vec![0.0; 1];
    assert!(m.mul_vec(&[1.0, 1.0], &mut short).is_err());
}

#[test]
fn linear_operator_apply_is_mul_vec() {
    let m = CsrMatrix::from_triplets(2, 2, &[(0, 1, 2.0), (1, 0, -2.0)]).unwrap();
    let mut w = vec![0.0; 2];
    m.apply(&[1.0, 1.0], &mut w).unwrap();
    assert_eq!(w, vec![2.0, -2.0]);
    assert_eq!(m.dimension(), 2);
}

#[test]
fn triplet_string_is_one_based() {
    let m = CsrMatrix::from_triplets(2, 2, &[(1, 0, 1.5)]).unwrap();
    let dump = m.to_triplet_string();
    assert!(dump.starts_with("2 1 "));
    assert_eq!(dump.lines().count(), 1);
}

// ─── Solver Tests ─────────────────────────────────────────────

/// Small non-symmetric system with a zero diagonal block, shaped like the
/// interface saddle-point matrix.
fn saddle_system() -> (CsrMatrix, Vec<f64>, Vec<f64>) {
    let m = CsrMatrix::from_triplets(
        3,
        3,
        &[
            (0, 0, 1.0),
            (0, 2, -1.0),
            (1, 1, 2.0),
            (1, 2, 1.0),
            (2, 0, 1.0),
            (2, 1, -1.0),
        ],
    )
    .unwrap();
    let x = vec![1.0, -2.0, 0.5];
    let mut b = vec![0.0; 3];
    m.mul_vec(&x, &mut b).unwrap();
    (m, x, b)
}

#[test]
fn sparse_lu_solves_saddle_system() {
    let (m, x, b) = saddle_system();
    let mut solver = FaerLuSolver::new();
    solver.factorize(&m).unwrap();
    assert!(solver.is_factorized());

    let mut sol = vec![0.0; 3];
    solver.solve(&b, &mut sol).unwrap();
    for (s, e) in sol.iter().zip(&x) {
        assert!((s - e).abs() < 1e-12, "got {s}, expected {e}");
    }
}

#[test]
fn dense_lu_agrees_with_sparse_lu() {
    let (m, _, b) = saddle_system();
    let mut sparse = LinearSolverKind::SparseLu.build();
    let mut dense = LinearSolverKind::DenseLu.build();
    sparse.factorize(&m).unwrap();
    dense.factorize(&m).unwrap();

    let mut xs = vec![0.0; 3];
    let mut xd = vec![0.0; 3];
    sparse.solve(&b, &mut xs).unwrap();
    dense.solve(&b, &mut xd).unwrap();
    for (a, d) in xs.iter().zip(&xd) {
        assert!((a - d).abs() < 1e-12);
    }
    assert!(m.residual_norm(&xs, &b).unwrap() < 1e-12);
}

#[test]
fn solve_before_factorize_fails() {
    let solver = FaerLuSolver::new();
    let mut sol = vec![0.0; 2];
    assert!(solver.solve(&[1.0, 1.0], &mut sol).is_err());
    assert!(!solver.is_factorized());
}

#[test]
fn non_square_matrix_is_rejected() {
    let m = CsrMatrix::from_triplets(2, 3, &[(0, 0, 1.0)]).unwrap();
    let mut solver = DenseLuSolver::new();
    assert!(solver.factorize(&m).is_err());
}

#[test]
fn singular_dense_system_reports_failure() {
    let m = CsrMatrix::from_triplets(
        2,
        2,
        &[(0, 0, 1.0), (0, 1, 2.0), (1, 0, 2.0), (1, 1, 4.0)],
    )
    .unwrap();
    let mut solver = DenseLuSolver::new();
    let result = solver
        .factorize(&m)
        .and_then(|_| {
            let mut sol = vec![0.0; 2];
            solver.solve(&[1.0, 1.0], &mut sol)
        });
    assert!(result.is_err());
}

#[test]
fn rhs_length_mismatch_is_rejected() {
    let (m, _, _) = saddle_system();
    let mut solver = FaerLuSolver::new();
    solver.factorize(&m).unwrap();
    let mut sol = vec![0.0; 3];
    assert!(solver.solve(&[1.0, 2.0], &mut sol).is_err());
}

#[test]
fn solver_kind_names() {
    assert_eq!(LinearSolverKind::default(), LinearSolverKind::SparseLu);
    assert_eq!(LinearSolverKind::SparseLu.build().name(), "faer_sparse_lu");
    assert_eq!(LinearSolverKind::DenseLu.build().name(), "faer_dense_lu");
}

#[test]
fn solver_kind_serde_is_snake_case() {
    let json = serde_json::to_string(&LinearSolverKind::DenseLu).unwrap();
    assert_eq!(json, "\"dense_lu\"");
}
