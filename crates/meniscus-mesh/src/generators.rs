//! Procedural interface generators for testing and demo runs.
//!
//! All generators produce closed, consistently oriented meshes with
//! outward normals under the convention of [`crate::normals`].

use std::collections::HashMap;
use std::f64::consts::PI;

use meniscus_types::{MeniscusError, MeniscusResult};

use crate::mesh::InterfaceMesh;

/// Regular polygon with `segments` vertices on a circle of `radius`,
/// centered at the origin, traversed counterclockwise.
///
/// # Example
/// ```
/// use meniscus_mesh::generators::circle;
/// let mesh = circle(16, 1.0).unwrap();
/// assert_eq!(mesh.vertex_count(), 16);
/// assert_eq!(mesh.cell_count(), 16);
/// ```
pub fn circle(segments: usize, radius: f64) -> MeniscusResult<InterfaceMesh> {
    ellipse(segments, radius, radius)
}

/// Polygonal ellipse with semi-axes `a` (along x) and `b` (along y).
pub fn ellipse(segments: usize, a: f64, b: f64) -> MeniscusResult<InterfaceMesh> {
    if segments < 3 {
        return Err(MeniscusError::InvalidMesh(format!(
            "a closed curve needs at least 3 segments, got {segments}"
        )));
    }
    if !(a > 0.0 && b > 0.0) {
        return Err(MeniscusError::InvalidMesh(format!(
            "semi-axes must be positive, got a={a}, b={b}"
        )));
    }

    let mut coords = Vec::with_capacity(segments * 2);
    let mut cells = Vec::with_capacity(segments * 2);
    for i in 0..segments {
        let theta = 2.0 * PI * i as f64 / segments as f64;
        coords.push(a * theta.cos());
        coords.push(b * theta.sin());

        cells.push(i as u32);
        cells.push(((i + 1) % segments) as u32);
    }

    InterfaceMesh::new(2, coords, cells)
}

/// Icosphere of `radius` obtained by `subdivisions` rounds of 1:4
/// refinement of the regular icosahedron, with every new vertex projected
/// onto the unit sphere before the next round.
///
/// Subdivision level `k` has `20 * 4^k` triangles and `10 * 4^k + 2`
/// vertices.
pub fn icosphere(subdivisions: u32, radius: f64) -> MeniscusResult<InterfaceMesh> {
    if !(radius > 0.0) {
        return Err(MeniscusError::InvalidMesh(format!(
            "radius must be positive, got {radius}"
        )));
    }

    let t = (1.0 + 5.0_f64.sqrt()) / 2.0;
    let mut points: Vec<[f64; 3]> = vec![
        [-1.0, t, 0.0],
        [1.0, t, 0.0],
        [-1.0, -t, 0.0],
        [1.0, -t, 0.0],
        [0.0, -1.0, t],
        [0.0, 1.0, t],
        [0.0, -1.0, -t],
        [0.0, 1.0, -t],
        [t, 0.0, -1.0],
        [t, 0.0, 1.0],
        [-t, 0.0, -1.0],
        [-t, 0.0, 1.0],
    ];
    let mut faces: Vec<[u32; 3]> = vec![
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];

    for p in &mut points {
        *p = unit(*p);
    }

    for _ in 0..subdivisions {
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
        let mut refined = Vec::with_capacity(faces.len() * 4);

        let mut midpoint = |i: u32, j: u32, points: &mut Vec<[f64; 3]>| -> u32 {
            let key = if i < j { (i, j) } else { (j, i) };
            *midpoints.entry(key).or_insert_with(|| {
                let (p, q) = (points[i as usize], points[j as usize]);
                points.push(unit([p[0] + q[0], p[1] + q[1], p[2] + q[2]]));
                (points.len() - 1) as u32
            })
        };

        for &[a, b, c] in &faces {
            let ab = midpoint(a, b, &mut points);
            let bc = midpoint(b, c, &mut points);
            let ca = midpoint(c, a, &mut points);
            refined.push([a, ab, ca]);
            refined.push([b, bc, ab]);
            refined.push([c, ca, bc]);
            refined.push([ab, bc, ca]);
        }
        faces = refined;
    }

    let mut coords = Vec::with_capacity(points.len() * 3);
    for p in &points {
        coords.extend_from_slice(&[p[0] * radius, p[1] * radius, p[2] * radius]);
    }
    let cells = faces.into_iter().flatten().collect();

    InterfaceMesh::new(3, coords, cells)
}

fn unit(p: [f64; 3]) -> [f64; 3] {
    let len = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
    [p[0] / len, p[1] / len, p[2] / len]
}
