//! Right-hand side of the interface system.
//!
//! The operator applied to `(0, −X)` gives `(Nᵀ X, −A X)`; the curvature
//! rows are then zeroed. This reuses the assembled bilinear form instead
//! of a second weak-form assembly.

use std::fmt::Write;

use meniscus_fem::{CombinedSpace, DiscreteFunction};
use meniscus_math::LinearOperator;
use meniscus_mesh::InterfaceMesh;
use meniscus_types::{MeniscusError, MeniscusResult};

use crate::operator::InterfaceOperator;

pub struct InterfaceRhs {
    space: CombinedSpace,
    rhs: Vec<f64>,
    /// `(0, −X)`, reused between assemblies.
    forcing: DiscreteFunction,
}

impl InterfaceRhs {
    pub fn new(space: CombinedSpace) -> Self {
        Self {
            space,
            rhs: vec![0.0; space.size()],
            forcing: DiscreteFunction::new(space),
        }
    }

    /// Rebuilds the vector from `operator` and the current coordinates.
    pub fn assemble(&mut self, operator: &InterfaceOperator, mesh: &InterfaceMesh) -> MeniscusResult<()> {
        if *operator.space() != self.space {
            return Err(MeniscusError::Precondition(
                "right-hand side and operator are built on different spaces".into(),
            ));
        }
        self.space.check_mesh(mesh)?;

        self.forcing.clear();
        for (f, &x) in self.forcing.displacement_mut().iter_mut().zip(mesh.coordinates()) {
            *f = -x;
        }

        operator.apply(self.forcing.dofs(), &mut self.rhs)?;
        self.rhs[..self.space.curvature_size()].fill(0.0);
        Ok(())
    }

    pub fn rhs(&self) -> &[f64] {
        &self.rhs
    }

    pub fn space(&self) -> &CombinedSpace {
        &self.space
    }

    /// Euclidean norm over all DOFs.
    pub fn norm(&self) -> f64 {
        self.rhs.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    /// One entry per line.
    pub fn dump(&self) -> String {
        let mut out = String::with_capacity(self.rhs.len() * 24);
        for value in &self.rhs {
            let _ = writeln!(out, "{value:.16e}");
        }
        out
    }
}
