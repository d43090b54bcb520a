//! Integration tests for meniscus-mesh.

use std::f64::consts::PI;

use meniscus_mesh::generators::{circle, ellipse, icosphere};
use meniscus_mesh::normals::{element_normal, element_normals, lumped_vertex_normals};
use meniscus_mesh::statistics::{average_radius, enclosed_volume, interface_measure};
use meniscus_mesh::{InterfaceMesh, InterfaceStatistics, Topology};
use meniscus_types::MeniscusError;

// ─── InterfaceMesh Tests ──────────────────────────────────────

fn unit_square_curve() -> InterfaceMesh {
    InterfaceMesh::new(
        2,
        vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0],
        vec![0, 1, 1, 2, 2, 3, 3, 0],
    )
    .unwrap()
}

#[test]
fn basic_counts() {
    let mesh = unit_square_curve();
    assert_eq!(mesh.world_dim(), 2);
    assert_eq!(mesh.grid_dim(), 1);
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.cell_count(), 4);
    assert_eq!(mesh.cell(2), &[2, 3]);
    assert_eq!(mesh.vertex(2), &[1.0, 1.0]);
}

#[test]
fn curve_positions_embed_with_zero_z() {
    let mesh = unit_square_curve();
    let p = mesh.position(1);
    assert_eq!((p.x, p.y, p.z), (1.0, 0.0, 0.0));
}

#[test]
fn validate_rejects_bad_world_dim() {
    let err = InterfaceMesh::new(4, vec![0.0; 8], vec![0, 1, 0, 1]).unwrap_err();
    assert!(matches!(err, MeniscusError::InvalidMesh(_)));
}

#[test]
fn validate_rejects_out_of_range_index() {
    assert!(InterfaceMesh::new(2, vec![0.0, 0.0, 1.0, 0.0], vec![0, 7]).is_err());
}

#[test]
fn validate_rejects_repeated_vertex() {
    assert!(InterfaceMesh::new(2, vec![0.0, 0.0, 1.0, 0.0], vec![1, 1]).is_err());
}

#[test]
fn validate_rejects_ragged_buffers() {
    assert!(InterfaceMesh::new(2, vec![0.0, 0.0, 1.0], vec![0, 1]).is_err());
    assert!(InterfaceMesh::new(3, vec![0.0; 9], vec![0, 1]).is_err());
}

#[test]
fn validate_rejects_non_finite_coordinates() {
    assert!(InterfaceMesh::new(2, vec![0.0, f64::NAN, 1.0, 0.0], vec![0, 1]).is_err());
}

#[test]
fn apply_displacement_adds_in_place() {
    let mut mesh = unit_square_curve();
    let mut dx = vec![0.0; 8];
    dx[2] = 0.5;
    dx[7] = -0.25;
    mesh.apply_displacement(&dx).unwrap();
    assert_eq!(mesh.vertex(1), &[1.5, 0.0]);
    assert_eq!(mesh.vertex(3), &[0.0, 0.75]);
}

#[test]
fn zero_displacement_is_bit_identical() {
    let mut mesh = InterfaceMesh::new(
        2,
        vec![-0.0, 0.1, 1.0 / 3.0, -0.0, 0.7, 0.9],
        vec![0, 1, 1, 2, 2, 0],
    )
    .unwrap();
    let before: Vec<u64> = mesh.coordinates().iter().map(|x| x.to_bits()).collect();
    mesh.apply_displacement(&[0.0; 6]).unwrap();
    let after: Vec<u64> = mesh.coordinates().iter().map(|x| x.to_bits()).collect();
    assert_eq!(before, after);
}

#[test]
fn apply_displacement_rejects_wrong_length() {
    let mut mesh = unit_square_curve();
    let err = mesh.apply_displacement(&[0.0; 3]).unwrap_err();
    assert!(matches!(err, MeniscusError::DimensionMismatch { .. }));
}

#[test]
fn cell_measures() {
    let mesh = unit_square_curve();
    for c in 0..4 {
        assert!((mesh.cell_measure(c) - 1.0).abs() < 1e-15);
    }
    let tri = InterfaceMesh::new(3, vec![0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 1.0, 0.0], vec![0, 1, 2])
        .unwrap();
    assert!((tri.cell_measure(0) - 1.0).abs() < 1e-15);
}

#[test]
fn json_roundtrip() {
    let mesh = unit_square_curve();
    let json = serde_json::to_string(&mesh).unwrap();
    let back: InterfaceMesh = serde_json::from_str(&json).unwrap();
    assert_eq!(mesh, back);
}

// ─── Normal Tests ─────────────────────────────────────────────

#[test]
fn segment_normal_points_outward_on_ccw_square() {
    let mesh = unit_square_curve();
    // Bottom edge (0,0)→(1,0): outward is -y.
    let n = element_normal(&mesh, 0).unwrap();
    assert!((n.y + 1.0).abs() < 1e-15);
    assert!(n.x.abs() < 1e-15);
    // Right edge (1,0)→(1,1): outward is +x.
    let n = element_normal(&mesh, 1).unwrap();
    assert!((n.x - 1.0).abs() < 1e-15);
}

#[test]
fn circle_normals_are_outward_unit_vectors() {
    let mesh = circle(24, 2.0).unwrap();
    let normals = element_normals(&mesh).unwrap();
    for (c, n) in normals.iter().enumerate() {
        let corners = mesh.cell_corners(c);
        let mid = 0.5 * (corners[0] + corners[1]);
        assert!((n.length() - 1.0).abs() < 1e-12);
        assert!(n.dot(mid) > 0.0, "cell {c} normal points inward");
    }
}

#[test]
fn icosphere_normals_are_outward() {
    let mesh = icosphere(1, 1.0).unwrap();
    for c in 0..mesh.cell_count() {
        let n = element_normal(&mesh, c).unwrap();
        let p = mesh.cell_corners(c);
        let centroid = (p[0] + p[1] + p[2]) / 3.0;
        assert!(n.dot(centroid) > 0.0, "face {c} normal points inward");
    }
}

#[test]
fn degenerate_cell_reports_error() {
    let mesh = InterfaceMesh::new(2, vec![0.5, 0.5, 0.5, 0.5], vec![0, 1]).unwrap();
    let err = element_normal(&mesh, 0).unwrap_err();
    assert!(matches!(err, MeniscusError::DegenerateElement { cell: 0, .. }));
}

#[test]
fn lumped_vertex_normals_on_sphere_are_radial() {
    let mesh = icosphere(2, 1.0).unwrap();
    let normals = lumped_vertex_normals(&mesh);
    for (v, n) in normals.iter().enumerate() {
        let radial = mesh.position(v).normalize();
        assert!(n.dot(radial) > 0.99);
    }
}

// ─── Topology Tests ───────────────────────────────────────────

#[test]
fn closed_curve_topology() {
    let mesh = circle(8, 1.0).unwrap();
    let topo = Topology::build(&mesh);
    assert_eq!(topo.facet_count(), 8);
    assert!(topo.is_closed());
    assert!(topo.is_manifold());
    assert!(topo.is_consistently_oriented());
    assert_eq!(topo.cell_neighbors[0], vec![1, 7]);
}

#[test]
fn open_curve_has_boundary() {
    let mesh = InterfaceMesh::new(2, vec![0.0, 0.0, 1.0, 0.0, 2.0, 0.0], vec![0, 1, 1, 2]).unwrap();
    let topo = Topology::build(&mesh);
    assert_eq!(topo.boundary_facet_count(), 2);
    assert!(!topo.is_closed());
}

#[test]
fn flipped_segment_breaks_orientation() {
    let mesh = InterfaceMesh::new(
        2,
        vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0],
        vec![0, 1, 2, 1, 2, 3, 3, 0],
    )
    .unwrap();
    assert!(!Topology::build(&mesh).is_consistently_oriented());
}

#[test]
fn icosphere_topology() {
    let mesh = icosphere(1, 1.0).unwrap();
    let topo = Topology::build(&mesh);
    // Euler: V - E + F = 2
    let v = mesh.vertex_count() as i64;
    let e = topo.facet_count() as i64;
    let f = mesh.cell_count() as i64;
    assert_eq!(v - e + f, 2);
    assert!(topo.is_closed());
    assert!(topo.is_consistently_oriented());
    assert!(topo.cell_neighbors.iter().all(|n| n.len() == 3));
}

// ─── Generator Tests ──────────────────────────────────────────

#[test]
fn circle_vertices_lie_on_radius() {
    let mesh = circle(32, 1.5).unwrap();
    assert_eq!(mesh.vertex_count(), 32);
    for v in 0..32 {
        assert!((mesh.position(v).length() - 1.5).abs() < 1e-14);
    }
}

#[test]
fn circle_rejects_too_few_segments() {
    assert!(circle(2, 1.0).is_err());
    assert!(circle(16, -1.0).is_err());
}

#[test]
fn ellipse_extents() {
    let mesh = ellipse(16, 2.0, 0.5).unwrap();
    assert!((mesh.vertex(0)[0] - 2.0).abs() < 1e-15);
    assert!((mesh.vertex(4)[1] - 0.5).abs() < 1e-15);
}

#[test]
fn icosphere_counts() {
    for k in 0..3u32 {
        let mesh = icosphere(k, 1.0).unwrap();
        let scale = 4usize.pow(k);
        assert_eq!(mesh.cell_count(), 20 * scale);
        assert_eq!(mesh.vertex_count(), 10 * scale + 2);
    }
}

// ─── Statistics Tests ─────────────────────────────────────────

#[test]
fn square_statistics() {
    let mesh = unit_square_curve();
    let stats = InterfaceStatistics::compute(&mesh);
    assert!((stats.measure - 4.0).abs() < 1e-14);
    assert!((stats.enclosed_volume - 1.0).abs() < 1e-14);
    assert!((stats.element_ratio - 1.0).abs() < 1e-14);
}

#[test]
fn circle_measure_and_area_converge() {
    let n = 256;
    let mesh = circle(n, 1.0).unwrap();
    assert!((interface_measure(&mesh) - 2.0 * PI).abs() < 1e-3);
    assert!((enclosed_volume(&mesh) - PI).abs() < 1e-3);
    assert!((average_radius(&mesh, Default::default()) - 1.0).abs() < 1e-14);
}

#[test]
fn sphere_volume_is_positive_and_close() {
    let mesh = icosphere(3, 1.0).unwrap();
    let volume = enclosed_volume(&mesh);
    assert!(volume > 0.0);
    assert!((volume - 4.0 / 3.0 * PI).abs() < 0.05);
    assert!((interface_measure(&mesh) - 4.0 * PI).abs() < 0.1);
}
