//! Geometric diagnostics of an interface.

use serde::{Deserialize, Serialize};

use meniscus_math::DVec3;

use crate::mesh::InterfaceMesh;

/// Snapshot of the interface geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterfaceStatistics {
    /// Total length (curves) or area (surfaces).
    pub measure: f64,
    /// Signed area (curves) or volume (surfaces) enclosed by the interface.
    /// Positive for outward orientation.
    pub enclosed_volume: f64,
    /// Ratio of largest to smallest cell measure.
    pub element_ratio: f64,
    /// Mean vertex distance from the origin.
    pub average_radius: f64,
}

impl InterfaceStatistics {
    /// Computes all statistics. The average radius is taken about the origin.
    pub fn compute(mesh: &InterfaceMesh) -> Self {
        Self {
            measure: interface_measure(mesh),
            enclosed_volume: enclosed_volume(mesh),
            element_ratio: element_ratio(mesh),
            average_radius: average_radius(mesh, DVec3::ZERO),
        }
    }
}

/// Sum of the absolute cell measures.
pub fn interface_measure(mesh: &InterfaceMesh) -> f64 {
    (0..mesh.cell_count()).map(|c| mesh.cell_measure(c).abs()).sum()
}

/// Largest over smallest cell measure.
pub fn element_ratio(mesh: &InterfaceMesh) -> f64 {
    let mut min = f64::MAX;
    let mut max = f64::MIN_POSITIVE;
    for c in 0..mesh.cell_count() {
        let m = mesh.cell_measure(c).abs();
        min = min.min(m);
        max = max.max(m);
    }
    max / min
}

/// Mean distance of the vertices from `center`.
pub fn average_radius(mesh: &InterfaceMesh, center: DVec3) -> f64 {
    let n = mesh.vertex_count();
    if n == 0 {
        return 0.0;
    }
    let sum: f64 = (0..n).map(|v| (mesh.position(v) - center).length()).sum();
    sum / n as f64
}

/// Signed enclosed area (shoelace) or volume (divergence theorem).
pub fn enclosed_volume(mesh: &InterfaceMesh) -> f64 {
    let mut volume = 0.0;
    for c in 0..mesh.cell_count() {
        let p = mesh.cell_corners(c);
        volume += match mesh.world_dim() {
            2 => 0.5 * (p[0].x * p[1].y - p[1].x * p[0].y),
            _ => p[0].dot(p[1].cross(p[2])) / 6.0,
        };
    }
    volume
}
