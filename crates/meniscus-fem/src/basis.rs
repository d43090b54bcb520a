//! First-order Lagrange shape functions on the reference cells.

use crate::reference::ReferenceCell;

/// Values of the P1 basis at reference point `xi`.
///
/// Segment: `(1 - ξ, ξ)`. Triangle: `(1 - ξ - η, ξ, η)`. The unused slot
/// of a segment is zero.
#[inline]
pub fn p1_values(cell: ReferenceCell, xi: &[f64; 2]) -> [f64; 3] {
    match cell {
        ReferenceCell::Segment => [1.0 - xi[0], xi[0], 0.0],
        ReferenceCell::Triangle => [1.0 - xi[0] - xi[1], xi[0], xi[1]],
    }
}
