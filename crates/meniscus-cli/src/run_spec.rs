//! Run files.
//!
//! A run file is TOML with three tables:
//!
//! ```toml
//! [mesh]
//! kind = "circle"        # or "ellipse", "sphere", "file"
//! segments = 64
//! radius = 1.0
//!
//! [output]
//! directory = "out"      # gnuplot series
//! solution = "out/solution.json"
//! final_mesh = "out/final.msh"
//!
//! [evolution]
//! use_mean_curvature_flow = true
//! end_time = 0.2
//! time_step = 0.001
//! ```
//!
//! Relative paths are resolved against the directory of the run file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use meniscus_mesh::generators::{circle, ellipse, icosphere};
use meniscus_mesh::InterfaceMesh;
use meniscus_solver::EvolutionConfig;
use meniscus_types::{MeniscusError, MeniscusResult};

/// Where the initial interface comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MeshSpec {
    /// A `.msh` or `.json` mesh file.
    File { path: PathBuf },
    Circle {
        segments: usize,
        #[serde(default = "unit")]
        radius: f64,
    },
    Ellipse { segments: usize, a: f64, b: f64 },
    Sphere {
        subdivisions: u32,
        #[serde(default = "unit")]
        radius: f64,
    },
}

fn unit() -> f64 {
    1.0
}

impl MeshSpec {
    pub fn build(&self) -> MeniscusResult<InterfaceMesh> {
        match self {
            MeshSpec::File { path } => meniscus_io::load_mesh(path),
            MeshSpec::Circle { segments, radius } => circle(*segments, *radius),
            MeshSpec::Ellipse { segments, a, b } => ellipse(*segments, *a, *b),
            MeshSpec::Sphere {
                subdivisions,
                radius,
            } => icosphere(*subdivisions, *radius),
        }
    }
}

/// What to write during and after the run. Everything is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSpec {
    /// Directory for the gnuplot statistics series.
    pub directory: Option<PathBuf>,
    /// JSON file with per-step coordinates, curvature and displacement.
    pub solution: Option<PathBuf>,
    /// Keep every k-th step in the solution file (1 when unset).
    pub solution_every: Option<u64>,
    /// Final mesh, `.msh` or `.json`.
    pub final_mesh: Option<PathBuf>,
    /// Telemetry events as JSON lines.
    pub telemetry: Option<PathBuf>,
    /// Also log every telemetry event through `tracing` at debug level.
    pub log_events: bool,
}

/// A complete run description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSpec {
    pub mesh: MeshSpec,
    #[serde(default)]
    pub output: OutputSpec,
    #[serde(default)]
    pub evolution: EvolutionConfig,
}

impl RunSpec {
    /// Parse a run file from TOML text. Paths are left as written.
    pub fn from_toml_str(text: &str) -> MeniscusResult<Self> {
        let run: RunSpec = toml::from_str(text)
            .map_err(|e| MeniscusError::Parse(format!("Run file: {e}")))?;
        run.evolution.validate()?;
        Ok(run)
    }

    /// Load a run file and resolve its relative paths against the file's directory.
    pub fn load(path: &Path) -> MeniscusResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let mut run = Self::from_toml_str(&text)?;
        if let Some(base) = path.parent() {
            run.resolve_paths(base);
        }
        Ok(run)
    }

    pub fn to_toml_string(&self) -> MeniscusResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| MeniscusError::Serialization(format!("Run file: {e}")))
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        if let MeshSpec::File { path } = &mut self.mesh {
            resolve(path);
        }
        let out = &mut self.output;
        for p in [
            &mut out.directory,
            &mut out.solution,
            &mut out.final_mesh,
            &mut out.telemetry,
        ]
        .into_iter()
        .flatten()
        {
            resolve(p);
        }
    }
}
