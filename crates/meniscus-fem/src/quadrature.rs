//! Quadrature rules on the reference segment and triangle.
//!
//! Points are stored in reference coordinates `[ξ, η]` (`η` unused on
//! segments). Weights sum to the reference volume.

use meniscus_types::{MeniscusError, MeniscusResult};

use crate::reference::ReferenceCell;

/// A quadrature rule on a reference cell.
#[derive(Debug, Clone)]
pub struct QuadratureRule {
    pub cell: ReferenceCell,
    /// Integration point coordinates
    pub points: Vec<[f64; 2]>,
    /// Integration weights
    pub weights: Vec<f64>,
}

impl QuadratureRule {
    /// Gauss rule on `cell` that integrates polynomials of degree `order`
    /// exactly.
    pub fn gauss(cell: ReferenceCell, order: usize) -> MeniscusResult<Self> {
        let rule = match (cell, order) {
            (ReferenceCell::Segment, 0..=1) => Self::line_1point(),
            (ReferenceCell::Segment, 2..=3) => Self::line_2point(),
            (ReferenceCell::Segment, 4..=5) => Self::line_3point(),
            (ReferenceCell::Triangle, 0..=1) => Self::triangle_1point(),
            (ReferenceCell::Triangle, 2) => Self::triangle_3point(),
            (ReferenceCell::Triangle, 3..=4) => Self::triangle_6point(),
            _ => {
                return Err(MeniscusError::Precondition(format!(
                    "no Gauss rule of order {order} on {cell:?}"
                )))
            }
        };
        Ok(rule)
    }

    /// Vertex rule: one point per corner, each with weight
    /// `reference_volume / corner_count`. Exact for P1 integrands.
    pub fn lagrange(cell: ReferenceCell) -> Self {
        let n = cell.vertex_count();
        let w = cell.volume() / n as f64;
        Self {
            cell,
            points: (0..n).map(|i| cell.corner(i)).collect(),
            weights: vec![w; n],
        }
    }

    /// Midpoint rule (degree 1 exactness).
    pub fn line_1point() -> Self {
        Self {
            cell: ReferenceCell::Segment,
            points: vec![[0.5, 0.0]],
            weights: vec![1.0],
        }
    }

    /// 2-point Gauss–Legendre (degree 3 exactness).
    pub fn line_2point() -> Self {
        let d = 0.5 / 3.0_f64.sqrt();
        Self {
            cell: ReferenceCell::Segment,
            points: vec![[0.5 - d, 0.0], [0.5 + d, 0.0]],
            weights: vec![0.5, 0.5],
        }
    }

    /// 3-point Gauss–Legendre (degree 5 exactness).
    pub fn line_3point() -> Self {
        let d = 0.5 * (3.0_f64 / 5.0).sqrt();
        Self {
            cell: ReferenceCell::Segment,
            points: vec![[0.5 - d, 0.0], [0.5, 0.0], [0.5 + d, 0.0]],
            weights: vec![5.0 / 18.0, 8.0 / 18.0, 5.0 / 18.0],
        }
    }

    /// Centroid rule (degree 1 exactness).
    pub fn triangle_1point() -> Self {
        Self {
            cell: ReferenceCell::Triangle,
            points: vec![[1.0 / 3.0, 1.0 / 3.0]],
            weights: vec![0.5],
        }
    }

    /// 3-point rule (degree 2 exactness).
    pub fn triangle_3point() -> Self {
        let a = 1.0 / 6.0;
        let b = 2.0 / 3.0;
        let w = 1.0 / 6.0;
        Self {
            cell: ReferenceCell::Triangle,
            points: vec![[a, a], [b, a], [a, b]],
            weights: vec![w, w, w],
        }
    }

    /// 6-point Dunavant rule (degree 4 exactness).
    pub fn triangle_6point() -> Self {
        let a1 = 0.445948490915965;
        let w1 = 0.5 * 0.223381589678011;
        let a2 = 0.091576213509771;
        let w2 = 0.5 * 0.109951743655322;

        Self {
            cell: ReferenceCell::Triangle,
            points: vec![
                [a1, a1],
                [1.0 - 2.0 * a1, a1],
                [a1, 1.0 - 2.0 * a1],
                [a2, a2],
                [1.0 - 2.0 * a2, a2],
                [a2, 1.0 - 2.0 * a2],
            ],
            weights: vec![w1, w1, w1, w2, w2, w2],
        }
    }

    /// Number of integration points.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// True if the rule has no points.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Iterates over `(point, weight)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&[f64; 2], f64)> + '_ {
        self.points.iter().zip(self.weights.iter().copied())
    }
}
