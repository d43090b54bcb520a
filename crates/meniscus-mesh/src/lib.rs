//! # meniscus-mesh
//!
//! Interface mesh representation: a closed, oriented hypersurface made of
//! segments (world dimension 2) or triangles (world dimension 3).
//!
//! ## Key Types
//!
//! - [`InterfaceMesh`] — Cells plus one interleaved coordinate buffer that
//!   has the same layout as the displacement unknowns.
//! - [`Topology`] — Facet adjacency (cell neighbors), closedness and
//!   orientation checks.
//! - [`normals`] — Outward unit normals per cell, lumped vertex normals.
//! - [`statistics`] — Geometric diagnostics (measure, enclosed volume,
//!   element ratio, average radius).
//! - Procedural generators for circles, ellipses and spheres.

pub mod generators;
pub mod mesh;
pub mod normals;
pub mod statistics;
pub mod topology;

pub use mesh::{CellCorners, InterfaceMesh};
pub use statistics::InterfaceStatistics;
pub use topology::Topology;
