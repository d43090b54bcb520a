//! Diagonal-and-neighbor sparsity stencil.
//!
//! Every DOF of a cell is coupled with every DOF of the cell itself and of
//! the cells sharing a facet with it. This is a superset of the entries
//! the interface operator writes, so the pattern is reserved once and
//! reused for every time step.

use meniscus_math::CsrMatrix;
use meniscus_mesh::{InterfaceMesh, Topology};
use meniscus_types::MeniscusResult;

use crate::space::CombinedSpace;

/// Row-wise column lists of the stencil (unsorted, may contain duplicates).
pub fn diagonal_and_neighbor_pattern(
    mesh: &InterfaceMesh,
    topology: &Topology,
    space: &CombinedSpace,
) -> Vec<Vec<usize>> {
    let w = space.world_dim();
    let mut pattern: Vec<Vec<usize>> = vec![Vec::new(); space.size()];

    let cell_dofs = |c: usize, out: &mut Vec<usize>| {
        for &v in mesh.cell(c) {
            let v = v as usize;
            out.push(space.curvature_dof(v));
            for d in 0..w {
                out.push(space.displacement_dof(v, d));
            }
        }
    };

    let mut rows = Vec::new();
    let mut cols = Vec::new();
    for c in 0..mesh.cell_count() {
        rows.clear();
        cols.clear();
        cell_dofs(c, &mut rows);
        cell_dofs(c, &mut cols);
        for &n in &topology.cell_neighbors[c] {
            cell_dofs(n as usize, &mut cols);
        }
        for &r in &rows {
            pattern[r].extend_from_slice(&cols);
        }
    }

    for row in &mut pattern {
        row.sort_unstable();
        row.dedup();
    }
    pattern
}

/// Allocates a zeroed square matrix with the stencil reserved.
pub fn reserve_matrix(
    mesh: &InterfaceMesh,
    topology: &Topology,
    space: &CombinedSpace,
) -> MeniscusResult<CsrMatrix> {
    let pattern = diagonal_and_neighbor_pattern(mesh, topology, space);
    CsrMatrix::from_pattern(space.size(), space.size(), &pattern)
}
