//! Mesh loading by file extension and mesh validation.
//!
//! `.msh` files go through the Gmsh reader, `.json` files hold a serialized
//! [`InterfaceMesh`]. Both paths end in [`InterfaceMesh::validate`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use meniscus_mesh::normals::normal_from_corners;
use meniscus_mesh::statistics::{enclosed_volume, interface_measure};
use meniscus_mesh::{InterfaceMesh, Topology};
use meniscus_types::{MeniscusError, MeniscusResult};

use crate::gmsh;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MeshFormat {
    Gmsh,
    Json,
}

fn format_of(path: &Path) -> MeniscusResult<MeshFormat> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("msh") => Ok(MeshFormat::Gmsh),
        Some("json") => Ok(MeshFormat::Json),
        _ => Err(MeniscusError::InvalidConfig(format!(
            "Unknown mesh format for '{}' (expected .msh or .json)",
            path.display()
        ))),
    }
}

/// Load an interface mesh from a `.msh` or `.json` file.
pub fn load_mesh(path: &Path) -> MeniscusResult<InterfaceMesh> {
    let mesh = match format_of(path)? {
        MeshFormat::Gmsh => gmsh::read_gmsh(path)?.mesh,
        MeshFormat::Json => {
            let text = std::fs::read_to_string(path)?;
            let mesh: InterfaceMesh = serde_json::from_str(&text)
                .map_err(|e| MeniscusError::Serialization(format!("JSON parse failed: {e}")))?;
            mesh.validate()?;
            mesh
        }
    };
    tracing::debug!(
        "Loaded {} ({} vertices, {} cells, world dimension {})",
        path.display(),
        mesh.vertex_count(),
        mesh.cell_count(),
        mesh.world_dim()
    );
    Ok(mesh)
}

/// Save an interface mesh as `.msh` or `.json`, chosen by extension.
pub fn save_mesh(path: &Path, mesh: &InterfaceMesh) -> MeniscusResult<()> {
    match format_of(path)? {
        MeshFormat::Gmsh => gmsh::write_gmsh(path, mesh, None)?,
        MeshFormat::Json => {
            let json = serde_json::to_string_pretty(mesh).map_err(|e| {
                MeniscusError::Serialization(format!("JSON serialization failed: {e}"))
            })?;
            std::fs::write(path, json)?;
        }
    }
    Ok(())
}

/// Result of [`validate_mesh`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshReport {
    pub world_dim: usize,
    pub vertex_count: usize,
    pub cell_count: usize,
    pub closed: bool,
    pub manifold: bool,
    pub consistently_oriented: bool,
    pub boundary_facets: usize,
    /// Cells whose normal cannot be computed.
    pub degenerate_cells: Vec<usize>,
    pub measure: f64,
    /// Positive for outward-oriented interfaces.
    pub enclosed_volume: f64,
}

impl MeshReport {
    /// Whether the mesh can be evolved: closed, manifold, consistently and
    /// outward oriented, with no degenerate cells.
    pub fn is_evolvable(&self) -> bool {
        self.closed
            && self.manifold
            && self.consistently_oriented
            && self.degenerate_cells.is_empty()
            && self.enclosed_volume > 0.0
    }

    /// Human-readable problems, empty when [`is_evolvable`](Self::is_evolvable).
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if !self.closed {
            problems.push(format!("{} boundary facets (mesh is not closed)", self.boundary_facets));
        }
        if !self.manifold {
            problems.push("a facet is shared by more than two cells".to_string());
        }
        if !self.consistently_oriented {
            problems.push("neighboring cells have opposite orientation".to_string());
        }
        if !self.degenerate_cells.is_empty() {
            problems.push(format!("degenerate cells: {:?}", self.degenerate_cells));
        }
        if self.enclosed_volume <= 0.0 {
            problems.push(format!(
                "enclosed volume {:.6e} is not positive (normals point inward)",
                self.enclosed_volume
            ));
        }
        problems
    }
}

/// Inspect topology and geometry of a mesh.
pub fn validate_mesh(mesh: &InterfaceMesh) -> MeshReport {
    let topology = Topology::build(mesh);
    let degenerate_cells = (0..mesh.cell_count())
        .filter(|&c| normal_from_corners(&mesh.cell_corners(c)).is_none())
        .collect();

    MeshReport {
        world_dim: mesh.world_dim(),
        vertex_count: mesh.vertex_count(),
        cell_count: mesh.cell_count(),
        closed: topology.is_closed(),
        manifold: topology.is_manifold(),
        consistently_oriented: topology.is_consistently_oriented(),
        boundary_facets: topology.boundary_facet_count(),
        degenerate_cells,
        measure: interface_measure(mesh),
        enclosed_volume: enclosed_volume(mesh),
    }
}
