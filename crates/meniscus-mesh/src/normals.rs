//! Outward unit normals of interface cells.
//!
//! Orientation convention:
//! - Segment `[p0, p1]` with tangent `t = p1 - p0`: `n = (t.y, -t.x) / |t|`.
//!   A counterclockwise closed curve gets outward normals.
//! - Triangle `[p0, p1, p2]`: `n = (p1 - p0) × (p2 - p0)` normalized.
//!   Counterclockwise winding seen from outside gets outward normals.

use meniscus_math::DVec3;
use meniscus_types::constants::DEGENERATE_MEASURE_THRESHOLD;
use meniscus_types::{MeniscusError, MeniscusResult};

use crate::mesh::{CellCorners, InterfaceMesh};

/// Unit normal from the corners of a single cell, or `None` if the cell
/// is degenerate (zero length or zero area).
pub fn normal_from_corners(corners: &CellCorners) -> Option<DVec3> {
    let scaled = scaled_normal(corners);
    let len = scaled.length();
    if len > DEGENERATE_MEASURE_THRESHOLD {
        Some(scaled / len)
    } else {
        None
    }
}

/// Normal scaled by the cell's integration element
/// (segment length, or twice the triangle area).
fn scaled_normal(corners: &CellCorners) -> DVec3 {
    match corners.len() {
        2 => {
            let t = corners[1] - corners[0];
            DVec3::new(t.y, -t.x, 0.0)
        }
        _ => (corners[1] - corners[0]).cross(corners[2] - corners[0]),
    }
}

/// Outward unit normal of cell `c`.
pub fn element_normal(mesh: &InterfaceMesh, c: usize) -> MeniscusResult<DVec3> {
    let corners = mesh.cell_corners(c);
    normal_from_corners(&corners).ok_or_else(|| MeniscusError::DegenerateElement {
        cell: c,
        measure: mesh.cell_measure(c),
    })
}

/// Outward unit normals of every cell.
pub fn element_normals(mesh: &InterfaceMesh) -> MeniscusResult<Vec<DVec3>> {
    (0..mesh.cell_count()).map(|c| element_normal(mesh, c)).collect()
}

/// Measure-weighted vertex normals.
///
/// Each cell's scaled normal is accumulated at its vertices and the sum is
/// normalized. Vertices whose accumulated normal vanishes keep a zero
/// vector.
pub fn lumped_vertex_normals(mesh: &InterfaceMesh) -> Vec<DVec3> {
    let mut normals = vec![DVec3::ZERO; mesh.vertex_count()];

    for c in 0..mesh.cell_count() {
        let n = scaled_normal(&mesh.cell_corners(c));
        for &v in mesh.cell(c) {
            normals[v as usize] += n;
        }
    }

    for n in &mut normals {
        let len = n.length();
        if len > 1e-10 {
            *n /= len;
        }
    }
    normals
}
