//! Integration tests for meniscus-fem.

use meniscus_fem::basis::p1_values;
use meniscus_fem::stencil::{diagonal_and_neighbor_pattern, reserve_matrix};
use meniscus_fem::{CellGeometry, CombinedSpace, DiscreteFunction, QuadratureRule, ReferenceCell};
use meniscus_mesh::generators::{circle, icosphere};
use meniscus_mesh::{InterfaceMesh, Topology};
use meniscus_types::MeniscusError;

// ─── Quadrature Tests ─────────────────────────────────────────

fn integrate(rule: &QuadratureRule, f: impl Fn(f64, f64) -> f64) -> f64 {
    rule.iter().map(|(p, w)| w * f(p[0], p[1])).sum()
}

#[test]
fn weights_sum_to_reference_volume() {
    for cell in [ReferenceCell::Segment, ReferenceCell::Triangle] {
        for order in 0..=4 {
            let rule = QuadratureRule::gauss(cell, order).unwrap();
            let total: f64 = rule.weights.iter().sum();
            assert!((total - cell.volume()).abs() < 1e-14, "{cell:?} order {order}");
        }
        let lagrange = QuadratureRule::lagrange(cell);
        let total: f64 = lagrange.weights.iter().sum();
        assert!((total - cell.volume()).abs() < 1e-15);
    }
}

#[test]
fn line_rule_of_order_three_is_exact_for_cubics() {
    let rule = QuadratureRule::gauss(ReferenceCell::Segment, 3).unwrap();
    assert_eq!(rule.len(), 2);
    assert!((integrate(&rule, |x, _| x * x * x) - 0.25).abs() < 1e-15);
    assert!((integrate(&rule, |x, _| x * x) - 1.0 / 3.0).abs() < 1e-15);
}

#[test]
fn triangle_rule_of_order_three_is_exact_for_quartics() {
    let rule = QuadratureRule::gauss(ReferenceCell::Triangle, 3).unwrap();
    assert_eq!(rule.len(), 6);
    // ∫ ξ²η² = 2!·2!/6! = 1/180
    assert!((integrate(&rule, |x, y| x * x * y * y) - 1.0 / 180.0).abs() < 1e-12);
    // ∫ ξ³ = 3!/5! = 1/20
    assert!((integrate(&rule, |x, _| x * x * x) - 1.0 / 20.0).abs() < 1e-12);
}

#[test]
fn unsupported_order_is_rejected() {
    let err = QuadratureRule::gauss(ReferenceCell::Triangle, 9).unwrap_err();
    assert!(matches!(err, MeniscusError::Precondition(_)));
}

#[test]
fn lagrange_rule_sits_on_corners() {
    let rule = QuadratureRule::lagrange(ReferenceCell::Triangle);
    assert_eq!(rule.points, vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
    assert!(rule.weights.iter().all(|&w| (w - 1.0 / 6.0).abs() < 1e-16));
}

// ─── Basis Tests ──────────────────────────────────────────────

#[test]
fn p1_basis_is_a_partition_of_unity() {
    for xi in [[0.2, 0.3], [0.0, 0.0], [0.7, 0.1]] {
        let phi = p1_values(ReferenceCell::Triangle, &xi);
        assert!((phi.iter().sum::<f64>() - 1.0).abs() < 1e-15);
    }
    let phi = p1_values(ReferenceCell::Segment, &[0.25, 0.0]);
    assert_eq!(phi, [0.75, 0.25, 0.0]);
}

#[test]
fn p1_basis_is_nodal() {
    let cell = ReferenceCell::Triangle;
    for i in 0..3 {
        let phi = p1_values(cell, &cell.corner(i));
        for (j, &value) in phi.iter().enumerate() {
            assert_eq!(value, if i == j { 1.0 } else { 0.0 });
        }
    }
}

// ─── Geometry Tests ───────────────────────────────────────────

#[test]
fn segment_geometry() {
    let mesh = InterfaceMesh::new(2, vec![1.0, 0.0, 1.0, 2.0], vec![0, 1]).unwrap();
    let g = CellGeometry::new(&mesh, 0).unwrap();
    assert!((g.integration_element - 2.0).abs() < 1e-15);
    assert!((g.measure() - 2.0).abs() < 1e-15);
    assert!((g.normal.x - 1.0).abs() < 1e-15);
    assert!((g.gradients[0].y + 0.5).abs() < 1e-15);
    assert!((g.gradients[1].y - 0.5).abs() < 1e-15);
    assert_eq!(g.vertices(), &[0, 1]);
}

fn delta(i: usize, j: usize) -> f64 {
    if i == j {
        1.0
    } else {
        0.0
    }
}

#[test]
fn triangle_gradients_reproduce_nodal_differences() {
    let mesh = icosphere(1, 2.0).unwrap();
    for c in [0, 17, 55] {
        let g = CellGeometry::new(&mesh, c).unwrap();
        let p = mesh.cell_corners(c);
        for i in 0..3 {
            assert!(g.gradients[i].dot(g.normal).abs() < 1e-12);
            for j in 0..3 {
                let expected = delta(i, j) - delta(i, 0);
                let got = g.gradients[i].dot(p[j] - p[0]);
                assert!((got - expected).abs() < 1e-12, "cell {c}, i={i}, j={j}");
            }
        }
        let sum = g.gradients[0] + g.gradients[1] + g.gradients[2];
        assert!(sum.length() < 1e-12);
        assert!((g.measure() - mesh.cell_measure(c)).abs() < 1e-14);
    }
}

#[test]
fn degenerate_geometry_is_rejected() {
    let mesh = InterfaceMesh::new(
        3,
        vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 2.0, 0.0, 0.0],
        vec![0, 1, 2],
    )
    .unwrap();
    let err = CellGeometry::new(&mesh, 0).unwrap_err();
    assert!(matches!(err, MeniscusError::DegenerateElement { cell: 0, .. }));
}

// ─── Space Tests ──────────────────────────────────────────────

#[test]
fn combined_space_layout() {
    let space = CombinedSpace::new(4, 3).unwrap();
    assert_eq!(space.curvature_size(), 4);
    assert_eq!(space.displacement_size(), 12);
    assert_eq!(space.size(), 16);
    assert_eq!(space.curvature_dof(2), 2);
    assert_eq!(space.displacement_dof(0, 0), 4);
    assert_eq!(space.displacement_dof(2, 1), 4 + 2 * 3 + 1);
}

#[test]
fn combined_space_rejects_bad_input() {
    assert!(CombinedSpace::new(4, 1).is_err());
    assert!(CombinedSpace::new(0, 2).is_err());
}

#[test]
fn space_checks_mesh() {
    let mesh = circle(8, 1.0).unwrap();
    let space = CombinedSpace::from_mesh(&mesh).unwrap();
    assert!(space.check_mesh(&mesh).is_ok());
    let other = circle(9, 1.0).unwrap();
    assert!(matches!(
        space.check_mesh(&other),
        Err(MeniscusError::DimensionMismatch { .. })
    ));
}

#[test]
fn discrete_function_blocks() {
    let space = CombinedSpace::new(3, 2).unwrap();
    let mut f = DiscreteFunction::new(space);
    assert_eq!(f.curvature().len(), 3);
    assert_eq!(f.displacement().len(), 6);

    f.curvature_mut()[1] = 3.0;
    f.displacement_mut()[0] = 4.0;
    assert_eq!(f.dofs()[1], 3.0);
    assert_eq!(f.dofs()[3], 4.0);
    assert!((f.norm() - 5.0).abs() < 1e-15);

    f.clear();
    assert_eq!(f.norm(), 0.0);
}

// ─── Stencil Tests ────────────────────────────────────────────

#[test]
fn circle_stencil_reaches_two_rings() {
    let mesh = circle(10, 1.0).unwrap();
    let topo = Topology::build(&mesh);
    let space = CombinedSpace::from_mesh(&mesh).unwrap();
    let pattern = diagonal_and_neighbor_pattern(&mesh, &topo, &space);

    // Vertex v touches cells v-1 and v; with their neighbors that spans
    // vertices v-2..=v+2, three DOFs each.
    assert_eq!(pattern[space.curvature_dof(5)].len(), 15);
    assert!(pattern[space.curvature_dof(5)].contains(&space.displacement_dof(7, 1)));
    assert!(!pattern[space.curvature_dof(5)].contains(&space.curvature_dof(8)));
}

#[test]
fn reserved_matrix_is_square_and_zero() {
    let mesh = icosphere(0, 1.0).unwrap();
    let topo = Topology::build(&mesh);
    let space = CombinedSpace::from_mesh(&mesh).unwrap();
    let m = reserve_matrix(&mesh, &topo, &space).unwrap();
    assert_eq!(m.rows, space.size());
    assert_eq!(m.cols, space.size());
    assert!(m.values.iter().all(|&v| v == 0.0));
    for v in 0..space.vertex_count() {
        assert!(m.contains(space.curvature_dof(v), space.displacement_dof(v, 2)));
    }
}
