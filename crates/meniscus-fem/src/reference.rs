//! Reference simplices.

use serde::{Deserialize, Serialize};

/// Reference cell of an interface of grid dimension 1 or 2.
///
/// - `Segment`: `ξ ∈ [0, 1]`, volume 1.
/// - `Triangle`: `{ξ, η ≥ 0, ξ + η ≤ 1}`, volume 1/2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceCell {
    Segment,
    Triangle,
}

impl ReferenceCell {
    /// Reference cell for a hypersurface in `world_dim` dimensions.
    pub fn for_world_dim(world_dim: usize) -> Option<Self> {
        match world_dim {
            2 => Some(ReferenceCell::Segment),
            3 => Some(ReferenceCell::Triangle),
            _ => None,
        }
    }

    /// Volume of the reference cell.
    pub fn volume(self) -> f64 {
        match self {
            ReferenceCell::Segment => 1.0,
            ReferenceCell::Triangle => 0.5,
        }
    }

    /// Number of corners.
    pub fn vertex_count(self) -> usize {
        match self {
            ReferenceCell::Segment => 2,
            ReferenceCell::Triangle => 3,
        }
    }

    /// Reference coordinates of corner `i`.
    pub fn corner(self, i: usize) -> [f64; 2] {
        match (self, i) {
            (ReferenceCell::Segment, 0) => [0.0, 0.0],
            (ReferenceCell::Segment, _) => [1.0, 0.0],
            (ReferenceCell::Triangle, 0) => [0.0, 0.0],
            (ReferenceCell::Triangle, 1) => [1.0, 0.0],
            (ReferenceCell::Triangle, _) => [0.0, 1.0],
        }
    }
}
