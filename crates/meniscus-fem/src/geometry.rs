//! Per-cell geometric quantities for P1 assembly.
//!
//! For affine simplices everything here is constant over the cell:
//! the unit normal, the integration element (Jacobian determinant of the
//! reference map) and the surface gradients of the P1 basis.

use meniscus_math::DVec3;
use meniscus_mesh::normals::normal_from_corners;
use meniscus_mesh::InterfaceMesh;
use meniscus_types::constants::DEGENERATE_MEASURE_THRESHOLD;
use meniscus_types::{MeniscusError, MeniscusResult};

use crate::reference::ReferenceCell;

/// Geometry of one interface cell.
#[derive(Debug, Clone, Copy)]
pub struct CellGeometry {
    pub reference: ReferenceCell,
    /// Global vertex indices (first `reference.vertex_count()` are valid).
    pub vertices: [usize; 3],
    /// Scaling from reference to physical measure: segment length, or
    /// twice the triangle area.
    pub integration_element: f64,
    /// Outward unit normal.
    pub normal: DVec3,
    /// Tangential gradients of the P1 basis functions.
    pub gradients: [DVec3; 3],
}

impl CellGeometry {
    /// Computes the geometry of cell `c`.
    ///
    /// Fails with `DegenerateElement` when the cell has (numerically) zero
    /// measure or non-finite corners.
    pub fn new(mesh: &InterfaceMesh, c: usize) -> MeniscusResult<Self> {
        let reference = ReferenceCell::for_world_dim(mesh.world_dim()).ok_or_else(|| {
            MeniscusError::InvalidMesh(format!("unsupported world dimension {}", mesh.world_dim()))
        })?;
        let corners = mesh.cell_corners(c);
        let degenerate = || MeniscusError::DegenerateElement {
            cell: c,
            measure: mesh.cell_measure(c),
        };
        let normal = normal_from_corners(&corners).ok_or_else(degenerate)?;

        let mut vertices = [0usize; 3];
        for (slot, &v) in vertices.iter_mut().zip(mesh.cell(c)) {
            *slot = v as usize;
        }

        let (integration_element, gradients) = match reference {
            ReferenceCell::Segment => {
                let t = corners[1] - corners[0];
                let len2 = t.length_squared();
                (len2.sqrt(), [-t / len2, t / len2, DVec3::ZERO])
            }
            ReferenceCell::Triangle => {
                let twice_area = (corners[1] - corners[0]).cross(corners[2] - corners[0]).length();
                // ∇λ_i = n × (p_{i+2} - p_{i+1}) / (2A)
                let mut gradients = [DVec3::ZERO; 3];
                for (i, g) in gradients.iter_mut().enumerate() {
                    let edge = corners[(i + 2) % 3] - corners[(i + 1) % 3];
                    *g = normal.cross(edge) / twice_area;
                }
                (twice_area, gradients)
            }
        };

        if !(integration_element > DEGENERATE_MEASURE_THRESHOLD) {
            return Err(degenerate());
        }

        Ok(Self {
            reference,
            vertices,
            integration_element,
            normal,
            gradients,
        })
    }

    /// Number of local basis functions.
    #[inline]
    pub fn local_count(&self) -> usize {
        self.reference.vertex_count()
    }

    /// Global vertex indices of the cell.
    #[inline]
    pub fn vertices(&self) -> &[usize] {
        &self.vertices[..self.local_count()]
    }

    /// Physical measure (length or area).
    #[inline]
    pub fn measure(&self) -> f64 {
        self.integration_element * self.reference.volume()
    }
}
