//! Core interface mesh type.
//!
//! Vertex coordinates are stored interleaved:
//! `coords: [x0, y0, (z0), x1, y1, (z1), ...]`
//!
//! This is exactly the node-major layout of the displacement block of the
//! discrete solution, so a displacement vector can be added to the mesh
//! without any reshuffling.

use serde::{Deserialize, Serialize};

use meniscus_math::DVec3;
use meniscus_types::{MeniscusError, MeniscusResult};

/// A closed, oriented simplicial hypersurface.
///
/// For `world_dim == 2` cells are segments `[v0, v1]`, for `world_dim == 3`
/// triangles `[v0, v1, v2]`. Cells are stored flat,
/// `world_dim` indices per cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceMesh {
    world_dim: usize,
    coords: Vec<f64>,
    cells: Vec<u32>,
}

/// The corners of one cell, embedded in 3D (z = 0 for curves).
#[derive(Debug, Clone, Copy)]
pub struct CellCorners {
    points: [DVec3; 3],
    count: usize,
}

impl CellCorners {
    /// The corner positions.
    #[inline]
    pub fn as_slice(&self) -> &[DVec3] {
        &self.points[..self.count]
    }

    /// Number of corners (2 for segments, 3 for triangles).
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Always false; a cell has at least two corners.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl std::ops::Index<usize> for CellCorners {
    type Output = DVec3;

    fn index(&self, i: usize) -> &DVec3 {
        &self.as_slice()[i]
    }
}

impl InterfaceMesh {
    /// Builds and validates a mesh.
    pub fn new(world_dim: usize, coords: Vec<f64>, cells: Vec<u32>) -> MeniscusResult<Self> {
        let mesh = Self {
            world_dim,
            coords,
            cells,
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Dimension of the embedding space (2 or 3).
    #[inline]
    pub fn world_dim(&self) -> usize {
        self.world_dim
    }

    /// Dimension of the interface itself (`world_dim - 1`).
    #[inline]
    pub fn grid_dim(&self) -> usize {
        self.world_dim - 1
    }

    /// Vertices per cell (equals `world_dim` for simplices of codimension one).
    #[inline]
    pub fn vertices_per_cell(&self) -> usize {
        self.world_dim
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.coords.len() / self.world_dim
    }

    /// Returns the number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len() / self.world_dim
    }

    /// Returns the vertex indices of cell `c`.
    #[inline]
    pub fn cell(&self, c: usize) -> &[u32] {
        let base = c * self.world_dim;
        &self.cells[base..base + self.world_dim]
    }

    /// Flat cell index buffer.
    #[inline]
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Returns the coordinates of vertex `v`.
    #[inline]
    pub fn vertex(&self, v: usize) -> &[f64] {
        let base = v * self.world_dim;
        &self.coords[base..base + self.world_dim]
    }

    /// Returns vertex `v` embedded in 3D.
    #[inline]
    pub fn position(&self, v: usize) -> DVec3 {
        let x = self.vertex(v);
        DVec3::new(x[0], x[1], if self.world_dim == 3 { x[2] } else { 0.0 })
    }

    /// The interleaved coordinate buffer.
    #[inline]
    pub fn coordinates(&self) -> &[f64] {
        &self.coords
    }

    /// Returns the corners of cell `c`.
    #[inline]
    pub fn cell_corners(&self, c: usize) -> CellCorners {
        let mut points = [DVec3::ZERO; 3];
        for (slot, &v) in points.iter_mut().zip(self.cell(c)) {
            *slot = self.position(v as usize);
        }
        CellCorners {
            points,
            count: self.world_dim,
        }
    }

    /// Length (segments) or area (triangles) of cell `c`.
    pub fn cell_measure(&self, c: usize) -> f64 {
        let p = self.cell_corners(c);
        match self.world_dim {
            2 => (p[1] - p[0]).length(),
            _ => 0.5 * (p[1] - p[0]).cross(p[2] - p[0]).length(),
        }
    }

    /// Adds a displacement field to the coordinates: `x ← x + dx`.
    ///
    /// `displacement` must have the layout of the coordinate buffer.
    /// Entries that are exactly zero leave the coordinate untouched, so a
    /// zero field keeps every coordinate bit-identical (including signed
    /// zeros).
    pub fn apply_displacement(&mut self, displacement: &[f64]) -> MeniscusResult<()> {
        if displacement.len() != self.coords.len() {
            return Err(MeniscusError::DimensionMismatch {
                context: "displacement field",
                expected: self.coords.len(),
                found: displacement.len(),
            });
        }
        for (x, &dx) in self.coords.iter_mut().zip(displacement) {
            if dx != 0.0 {
                *x += dx;
            }
        }
        Ok(())
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - World dimension is 2 or 3
    /// - Coordinate and cell buffers are multiples of the world dimension
    /// - Cell indices are within bounds
    /// - No cell repeats a vertex
    /// - All coordinates are finite
    pub fn validate(&self) -> MeniscusResult<()> {
        if self.world_dim != 2 && self.world_dim != 3 {
            return Err(MeniscusError::InvalidMesh(format!(
                "world dimension must be 2 or 3, got {}",
                self.world_dim
            )));
        }
        if self.coords.len() % self.world_dim != 0 {
            return Err(MeniscusError::InvalidMesh(format!(
                "coordinate count ({}) is not divisible by world dimension {}",
                self.coords.len(),
                self.world_dim
            )));
        }
        if self.cells.len() % self.world_dim != 0 {
            return Err(MeniscusError::InvalidMesh(format!(
                "cell index count ({}) is not divisible by {}",
                self.cells.len(),
                self.world_dim
            )));
        }
        if self.cells.is_empty() {
            return Err(MeniscusError::InvalidMesh("mesh has no cells".into()));
        }
        if let Some(i) = self.coords.iter().position(|x| !x.is_finite()) {
            return Err(MeniscusError::InvalidMesh(format!(
                "coordinate {} of vertex {} is not finite",
                i % self.world_dim,
                i / self.world_dim
            )));
        }

        let n = self.vertex_count();
        for (i, &idx) in self.cells.iter().enumerate() {
            if idx as usize >= n {
                return Err(MeniscusError::InvalidMesh(format!(
                    "index {} at position {} is out of range (vertex count: {})",
                    idx, i, n
                )));
            }
        }

        for c in 0..self.cell_count() {
            let cell = self.cell(c);
            for a in 0..cell.len() {
                if cell[a + 1..].contains(&cell[a]) {
                    return Err(MeniscusError::InvalidMesh(format!(
                        "cell {} has repeated vertex indices: {:?}",
                        c, cell
                    )));
                }
            }
        }

        Ok(())
    }
}
