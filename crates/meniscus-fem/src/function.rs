//! Discrete functions over a [`CombinedSpace`].

use serde::{Deserialize, Serialize};

use crate::space::CombinedSpace;

/// Coefficient vector: curvature block first, then displacement block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscreteFunction {
    space: CombinedSpace,
    dofs: Vec<f64>,
}

impl DiscreteFunction {
    /// Zero function.
    pub fn new(space: CombinedSpace) -> Self {
        Self {
            space,
            dofs: vec![0.0; space.size()],
        }
    }

    pub fn space(&self) -> &CombinedSpace {
        &self.space
    }

    pub fn dofs(&self) -> &[f64] {
        &self.dofs
    }

    pub fn dofs_mut(&mut self) -> &mut [f64] {
        &mut self.dofs
    }

    pub fn curvature(&self) -> &[f64] {
        &self.dofs[..self.space.curvature_size()]
    }

    pub fn curvature_mut(&mut self) -> &mut [f64] {
        let n = self.space.curvature_size();
        &mut self.dofs[..n]
    }

    /// Displacement block, laid out like the mesh coordinates.
    pub fn displacement(&self) -> &[f64] {
        &self.dofs[self.space.curvature_size()..]
    }

    pub fn displacement_mut(&mut self) -> &mut [f64] {
        let n = self.space.curvature_size();
        &mut self.dofs[n..]
    }

    /// Sets every coefficient to zero.
    pub fn clear(&mut self) {
        self.dofs.fill(0.0);
    }

    /// Euclidean norm over all DOFs.
    pub fn norm(&self) -> f64 {
        self.dofs.iter().map(|x| x * x).sum::<f64>().sqrt()
    }
}
