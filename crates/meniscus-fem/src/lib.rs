//! # meniscus-fem
//!
//! Finite element building blocks for the interface problem.
//!
//! ## Key Types
//!
//! - [`ReferenceCell`] — Reference segment `[0, 1]` and triangle.
//! - [`QuadratureRule`] — Gauss rules by exactness order and the
//!   vertex-based Lagrange rule.
//! - [`CellGeometry`] — Per-cell normal, integration element and constant
//!   P1 surface gradients.
//! - [`CombinedSpace`] — DOF layout: curvature block, then node-major
//!   displacement block.
//! - [`DiscreteFunction`] — Coefficient vector over a combined space.
//! - [`stencil`] — Diagonal-and-neighbor sparsity pattern.

pub mod basis;
pub mod function;
pub mod geometry;
pub mod quadrature;
pub mod reference;
pub mod space;
pub mod stencil;

pub use function::DiscreteFunction;
pub use geometry::CellGeometry;
pub use quadrature::QuadratureRule;
pub use reference::ReferenceCell;
pub use space::CombinedSpace;
