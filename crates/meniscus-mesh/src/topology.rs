//! Mesh topology queries.
//!
//! A facet is the shared boundary of two cells: a vertex for curves, an
//! edge for surfaces. The facet map gives the face-neighbor relation used
//! by the sparsity stencil, and the closedness/orientation checks that
//! guard the outward-normal convention.

use std::collections::HashMap;

use crate::mesh::InterfaceMesh;

/// Canonical facet key. Curves use `[v, u32::MAX]`.
type FacetKey = [u32; 2];

/// Precomputed topology information for an interface mesh.
///
/// Built once; the evolution moves vertices but never changes
/// connectivity.
#[derive(Debug, Clone)]
pub struct Topology {
    /// For each cell, the cells sharing a facet with it.
    pub cell_neighbors: Vec<Vec<u32>>,

    /// For each vertex, the cells that contain it.
    pub vertex_cells: Vec<Vec<u32>>,

    /// Number of cells attached to each facet, keyed by facet.
    facet_cells: HashMap<FacetKey, Vec<u32>>,

    /// Directed facet occurrences: how often each oriented facet appears.
    /// For a consistently oriented closed mesh every count is 1.
    directed_facets: HashMap<(u32, u32), u32>,

    world_dim: usize,
}

impl Topology {
    /// Build topology from an interface mesh.
    pub fn build(mesh: &InterfaceMesh) -> Self {
        let cell_count = mesh.cell_count();

        let mut vertex_cells: Vec<Vec<u32>> = vec![Vec::new(); mesh.vertex_count()];
        let mut facet_cells: HashMap<FacetKey, Vec<u32>> = HashMap::new();
        let mut directed_facets: HashMap<(u32, u32), u32> = HashMap::new();

        for c in 0..cell_count {
            let cell = mesh.cell(c);
            for &v in cell {
                vertex_cells[v as usize].push(c as u32);
            }

            match cell.len() {
                2 => {
                    // A segment [a, b] leaves a and enters b.
                    facet_cells.entry([cell[0], u32::MAX]).or_default().push(c as u32);
                    facet_cells.entry([cell[1], u32::MAX]).or_default().push(c as u32);
                    *directed_facets.entry((cell[0], u32::MAX)).or_default() += 1;
                    *directed_facets.entry((u32::MAX, cell[1])).or_default() += 1;
                }
                _ => {
                    let (a, b, d) = (cell[0], cell[1], cell[2]);
                    for (v0, v1) in [(a, b), (b, d), (d, a)] {
                        let key = if v0 < v1 { [v0, v1] } else { [v1, v0] };
                        facet_cells.entry(key).or_default().push(c as u32);
                        *directed_facets.entry((v0, v1)).or_default() += 1;
                    }
                }
            }
        }

        let mut cell_neighbors: Vec<Vec<u32>> = vec![Vec::new(); cell_count];
        for cells in facet_cells.values() {
            for &ci in cells {
                for &cj in cells {
                    if ci != cj && !cell_neighbors[ci as usize].contains(&cj) {
                        cell_neighbors[ci as usize].push(cj);
                    }
                }
            }
        }
        for neighbors in &mut cell_neighbors {
            neighbors.sort_unstable();
        }

        Self {
            cell_neighbors,
            vertex_cells,
            facet_cells,
            directed_facets,
            world_dim: mesh.world_dim(),
        }
    }

    /// Returns the number of distinct facets.
    pub fn facet_count(&self) -> usize {
        self.facet_cells.len()
    }

    /// Returns the number of boundary facets (facets with only 1 adjacent cell).
    pub fn boundary_facet_count(&self) -> usize {
        self.facet_cells
            .values()
            .filter(|cells| cells.len() == 1)
            .count()
    }

    /// Returns true if the mesh is closed (no boundary facets).
    pub fn is_closed(&self) -> bool {
        self.boundary_facet_count() == 0
    }

    /// Returns true if no facet is shared by more than two cells.
    pub fn is_manifold(&self) -> bool {
        self.facet_cells.values().all(|cells| cells.len() <= 2)
    }

    /// Returns true if neighboring cells induce opposite orientations on
    /// their shared facet.
    ///
    /// Curves: every vertex is left by exactly one segment and entered by
    /// exactly one. Surfaces: no directed edge occurs twice.
    pub fn is_consistently_oriented(&self) -> bool {
        match self.world_dim {
            2 => self.facet_cells.keys().all(|key| {
                let v = key[0];
                let out = self.directed_facets.get(&(v, u32::MAX)).copied().unwrap_or(0);
                let inc = self.directed_facets.get(&(u32::MAX, v)).copied().unwrap_or(0);
                out <= 1 && inc <= 1 && (out + inc == 1 || out == inc)
            }),
            _ => self.directed_facets.values().all(|&count| count == 1),
        }
    }
}
