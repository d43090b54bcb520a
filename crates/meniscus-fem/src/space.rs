//! Combined curvature/displacement discrete space.
//!
//! DOF layout over a mesh with `n` vertices in world dimension `W`:
//!
//! ```text
//! [ κ_0 .. κ_{n-1} | x_0 y_0 (z_0) x_1 y_1 (z_1) ... ]
//!   curvature (n)     displacement (n·W, node-major)
//! ```
//!
//! The displacement block matches the mesh coordinate buffer entry for
//! entry.

use serde::{Deserialize, Serialize};

use meniscus_mesh::InterfaceMesh;
use meniscus_types::{MeniscusError, MeniscusResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedSpace {
    vertex_count: usize,
    world_dim: usize,
}

impl CombinedSpace {
    pub fn new(vertex_count: usize, world_dim: usize) -> MeniscusResult<Self> {
        if world_dim != 2 && world_dim != 3 {
            return Err(MeniscusError::Precondition(format!(
                "world dimension must be 2 or 3, got {world_dim}"
            )));
        }
        if vertex_count == 0 {
            return Err(MeniscusError::Precondition("discrete space is empty".into()));
        }
        Ok(Self {
            vertex_count,
            world_dim,
        })
    }

    /// Space over the vertices of `mesh`.
    pub fn from_mesh(mesh: &InterfaceMesh) -> MeniscusResult<Self> {
        Self::new(mesh.vertex_count(), mesh.world_dim())
    }

    #[inline]
    pub fn world_dim(&self) -> usize {
        self.world_dim
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Size of the curvature block.
    #[inline]
    pub fn curvature_size(&self) -> usize {
        self.vertex_count
    }

    /// Size of the displacement block.
    #[inline]
    pub fn displacement_size(&self) -> usize {
        self.vertex_count * self.world_dim
    }

    /// Total number of DOFs.
    #[inline]
    pub fn size(&self) -> usize {
        self.curvature_size() + self.displacement_size()
    }

    /// Global index of the curvature DOF at vertex `v`.
    #[inline]
    pub fn curvature_dof(&self, v: usize) -> usize {
        v
    }

    /// Global index of displacement component `d` at vertex `v`.
    #[inline]
    pub fn displacement_dof(&self, v: usize, d: usize) -> usize {
        self.vertex_count + v * self.world_dim + d
    }

    /// Checks that `mesh` is the mesh this space was built for.
    pub fn check_mesh(&self, mesh: &InterfaceMesh) -> MeniscusResult<()> {
        if mesh.world_dim() != self.world_dim {
            return Err(MeniscusError::DimensionMismatch {
                context: "mesh world dimension",
                expected: self.world_dim,
                found: mesh.world_dim(),
            });
        }
        if mesh.vertex_count() != self.vertex_count {
            return Err(MeniscusError::DimensionMismatch {
                context: "mesh vertex count",
                expected: self.vertex_count,
                found: mesh.vertex_count(),
            });
        }
        Ok(())
    }
}
