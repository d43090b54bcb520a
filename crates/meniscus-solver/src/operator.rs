//! Interface operator — the saddle-point system of one time step.
//!
//! ```text
//! [ A_curv  −Nᵀ ] [ κ  ]
//! [ N        A  ] [ ΔX ]
//! ```
//!
//! - `A_curv`: Δt·mass (mean curvature flow) or Δt·stiffness (surface
//!   diffusion) on the curvature space.
//! - `A`: Laplace–Beltrami stiffness, applied to each displacement
//!   component independently.
//! - `N`: `∫ φ_j (φ_a n_d)`, coupling curvature DOF `j` with displacement
//!   component `d` of vertex `a`. The transposed block is the exact
//!   negation and is not time scaled.
//!
//! The sparsity pattern is reserved on first assembly; every later
//! assembly only clears and refills values.

use meniscus_fem::basis::p1_values;
use meniscus_fem::stencil::reserve_matrix;
use meniscus_fem::{CellGeometry, CombinedSpace, QuadratureRule, ReferenceCell};
use meniscus_math::{CsrMatrix, LinearOperator};
use meniscus_mesh::{InterfaceMesh, Topology};
use meniscus_types::constants::POLYNOMIAL_ORDER;
use meniscus_types::{MeniscusError, MeniscusResult};

use crate::flow::{CouplingQuadrature, FlowLaw, MotionMode};

/// Assembled system matrix of the interface problem.
pub struct InterfaceOperator {
    space: CombinedSpace,
    flow: FlowLaw,
    coupling: CouplingQuadrature,
    /// Gauss rule of order `2p + 1` for the curvature and displacement blocks.
    gauss: QuadratureRule,
    /// Rule used for the coupling block.
    coupling_rule: QuadratureRule,
    matrix: Option<CsrMatrix>,
    assembled: bool,
}

impl InterfaceOperator {
    /// Creates an unassembled operator over `space`.
    pub fn new(
        space: CombinedSpace,
        flow: FlowLaw,
        coupling: CouplingQuadrature,
    ) -> MeniscusResult<Self> {
        let reference = ReferenceCell::for_world_dim(space.world_dim()).ok_or_else(|| {
            MeniscusError::Precondition(format!(
                "no reference cell for world dimension {}",
                space.world_dim()
            ))
        })?;
        let gauss = QuadratureRule::gauss(reference, 2 * POLYNOMIAL_ORDER + 1)?;
        let coupling_rule = match coupling {
            CouplingQuadrature::Gauss => gauss.clone(),
            CouplingQuadrature::Lagrange => QuadratureRule::lagrange(reference),
        };

        Ok(Self {
            space,
            flow,
            coupling,
            gauss,
            coupling_rule,
            matrix: None,
            assembled: false,
        })
    }

    pub fn space(&self) -> &CombinedSpace {
        &self.space
    }

    pub fn flow_law(&self) -> FlowLaw {
        self.flow
    }

    pub fn coupling_quadrature(&self) -> CouplingQuadrature {
        self.coupling
    }

    pub fn is_assembled(&self) -> bool {
        self.assembled
    }

    /// The assembled matrix.
    pub fn matrix(&self) -> MeniscusResult<&CsrMatrix> {
        match (&self.matrix, self.assembled) {
            (Some(matrix), true) => Ok(matrix),
            _ => Err(MeniscusError::Precondition(
                "interface operator used before assemble()".into(),
            )),
        }
    }

    /// Rebuilds the matrix for the current geometry of `mesh`.
    ///
    /// On error the operator stays unassembled.
    pub fn assemble(&mut self, mesh: &InterfaceMesh, mode: MotionMode) -> MeniscusResult<()> {
        self.assembled = false;
        self.space.check_mesh(mesh)?;

        let time_step = match mode {
            MotionMode::Evolving { time_step } => {
                if !(time_step > 0.0 && time_step.is_finite()) {
                    return Err(MeniscusError::Precondition(format!(
                        "time step must be positive and finite, got {time_step}"
                    )));
                }
                Some(time_step)
            }
            MotionMode::ZeroVelocity => None,
        };

        if self.matrix.is_none() {
            let topology = Topology::build(mesh);
            self.matrix = Some(reserve_matrix(mesh, &topology, &self.space)?);
        }

        let Self {
            space,
            flow,
            gauss,
            coupling_rule,
            matrix,
            ..
        } = &mut *self;
        let matrix = matrix
            .as_mut()
            .ok_or_else(|| MeniscusError::Precondition("matrix storage not reserved".into()))?;
        matrix.clear();

        let cell = CellAssembler {
            space,
            flow: *flow,
            gauss,
            coupling_rule,
            time_step,
        };
        for c in 0..mesh.cell_count() {
            let geometry = CellGeometry::new(mesh, c)?;
            cell.assemble(matrix, &geometry)?;
        }

        self.assembled = true;
        Ok(())
    }

    /// Matrix as `row col value` lines, 1-based.
    pub fn dump(&self) -> MeniscusResult<String> {
        Ok(self.matrix()?.to_triplet_string())
    }
}

impl LinearOperator for InterfaceOperator {
    fn apply(&self, u: &[f64], w: &mut [f64]) -> MeniscusResult<()> {
        self.matrix()?.mul_vec(u, w)
    }

    fn dimension(&self) -> usize {
        self.space.size()
    }
}

/// Local contributions of one cell.
struct CellAssembler<'a> {
    space: &'a CombinedSpace,
    flow: FlowLaw,
    gauss: &'a QuadratureRule,
    coupling_rule: &'a QuadratureRule,
    /// `None` leaves out the curvature block.
    time_step: Option<f64>,
}

impl CellAssembler<'_> {
    fn assemble(&self, matrix: &mut CsrMatrix, geometry: &CellGeometry) -> MeniscusResult<()> {
        let space = self.space;
        let vertices = geometry.vertices();
        let n = vertices.len();
        let w = space.world_dim();
        let grads = &geometry.gradients;
        let normal = geometry.normal.to_array();

        // A_curv and A
        for (xi, qw) in self.gauss.iter() {
            let phi = p1_values(geometry.reference, xi);
            let weight = qw * geometry.integration_element;

            for j in 0..n {
                for k in 0..n {
                    let stiffness = grads[j].dot(grads[k]);

                    if let Some(dt) = self.time_step {
                        let value = match self.flow {
                            FlowLaw::MeanCurvatureFlow => phi[j] * phi[k],
                            FlowLaw::SurfaceDiffusion => stiffness,
                        };
                        matrix.add(
                            space.curvature_dof(vertices[j]),
                            space.curvature_dof(vertices[k]),
                            value * weight * dt,
                        )?;
                    }

                    for d in 0..w {
                        matrix.add(
                            space.displacement_dof(vertices[j], d),
                            space.displacement_dof(vertices[k], d),
                            stiffness * weight,
                        )?;
                    }
                }
            }
        }

        // N and −Nᵀ
        for (xi, qw) in self.coupling_rule.iter() {
            let phi = p1_values(geometry.reference, xi);
            let weight = qw * geometry.integration_element;

            for a in 0..n {
                for j in 0..n {
                    for (d, &n_d) in normal.iter().enumerate().take(w) {
                        let value = weight * phi[j] * phi[a] * n_d;
                        let disp = space.displacement_dof(vertices[a], d);
                        let curv = space.curvature_dof(vertices[j]);
                        matrix.add(disp, curv, value)?;
                        matrix.add(curv, disp, -value)?;
                    }
                }
            }
        }

        Ok(())
    }
}
