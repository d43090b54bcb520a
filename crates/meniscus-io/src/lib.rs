//! # meniscus-io
//!
//! Input/output around an evolution run.
//!
//! - [`gmsh`] — MSH 2.2 ASCII reader/writer for line and triangle meshes.
//! - [`loader`] — Mesh loading by file extension and mesh validation reports.
//! - [`gnuplot`] — `(t, value)` time series in `.dat` files.
//! - [`recorder`] — Observer writing interface statistics as time series.
//! - [`exporter`] — Observer dumping per-step solutions to JSON.

pub mod exporter;
pub mod gmsh;
pub mod gnuplot;
pub mod loader;
pub mod recorder;

pub use exporter::{read_solution_dump, JsonSolutionExporter, SolutionDump, SolutionFrame};
pub use gmsh::{parse_gmsh, read_gmsh, write_gmsh, write_gmsh_to, GmshError, GmshInterface};
pub use gnuplot::GnuplotWriter;
pub use loader::{load_mesh, save_mesh, validate_mesh, MeshReport};
pub use recorder::StatisticsRecorder;
