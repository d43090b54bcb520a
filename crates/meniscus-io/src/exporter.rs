//! JSON solution exporter.
//!
//! Captures coordinates, curvature and displacement at every snapshot and
//! serializes the whole run to one JSON file at run end.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use meniscus_mesh::InterfaceMesh;
use meniscus_solver::{EvolutionConfig, EvolutionObserver, EvolutionReport, StepSnapshot};
use meniscus_types::{MeniscusError, MeniscusResult};

/// One captured snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionFrame {
    pub step: u64,
    pub time: f64,
    pub stationary: bool,
    /// Interleaved coordinates after the step.
    pub coordinates: Vec<f64>,
    /// One value per vertex.
    pub curvature: Vec<f64>,
    /// Interleaved, same layout as `coordinates`.
    pub displacement: Vec<f64>,
}

/// Complete run data as written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionDump {
    pub world_dim: usize,
    pub vertex_count: usize,
    pub cells: Vec<u32>,
    pub config: Option<EvolutionConfig>,
    pub report: Option<EvolutionReport>,
    pub frames: Vec<SolutionFrame>,
}

/// Writes every snapshot of a run to a JSON file.
///
/// With `every = k`, only steps that are multiples of `k` are kept; the
/// initial state and the final step are always kept.
pub struct JsonSolutionExporter {
    output_path: PathBuf,
    every: u64,
    dump: Option<SolutionDump>,
    pending: Option<SolutionFrame>,
}

impl JsonSolutionExporter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            every: 1,
            dump: None,
            pending: None,
        }
    }

    pub fn every(mut self, every: u64) -> Self {
        self.every = every.max(1);
        self
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn frame_count(&self) -> usize {
        self.dump.as_ref().map_or(0, |d| d.frames.len()) + usize::from(self.pending.is_some())
    }

    fn begin(&mut self, mesh: &InterfaceMesh, config: Option<&EvolutionConfig>) {
        self.dump = Some(SolutionDump {
            world_dim: mesh.world_dim(),
            vertex_count: mesh.vertex_count(),
            cells: mesh.cells().to_vec(),
            config: config.cloned(),
            report: None,
            frames: Vec::new(),
        });
        self.pending = None;
    }
}

impl EvolutionObserver for JsonSolutionExporter {
    fn on_run_begin(&mut self, mesh: &InterfaceMesh, config: &EvolutionConfig) -> MeniscusResult<()> {
        self.begin(mesh, Some(config));
        Ok(())
    }

    fn on_snapshot(&mut self, snapshot: &StepSnapshot<'_>) -> MeniscusResult<()> {
        if self.dump.is_none() {
            self.begin(snapshot.mesh, None);
        }
        let frame = SolutionFrame {
            step: snapshot.step,
            time: snapshot.time,
            stationary: snapshot.stationary,
            coordinates: snapshot.mesh.coordinates().to_vec(),
            curvature: snapshot.solution.curvature().to_vec(),
            displacement: snapshot.solution.displacement().to_vec(),
        };
        let Some(dump) = self.dump.as_mut() else {
            return Ok(());
        };
        if frame.step % self.every == 0 {
            dump.frames.push(frame);
            self.pending = None;
        } else {
            self.pending = Some(frame);
        }
        Ok(())
    }

    fn on_run_end(&mut self, report: &EvolutionReport) -> MeniscusResult<()> {
        let Some(mut dump) = self.dump.take() else {
            return Err(MeniscusError::Precondition(
                "JSON exporter finished a run without snapshots".into(),
            ));
        };
        if let Some(last) = self.pending.take() {
            dump.frames.push(last);
        }
        dump.report = Some(report.clone());

        let json = serde_json::to_string(&dump).map_err(|e| {
            MeniscusError::Serialization(format!("JSON serialization failed: {e}"))
        })?;
        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.output_path, json)?;
        tracing::info!(
            "Wrote {} frames to {}",
            dump.frames.len(),
            self.output_path.display()
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "json_solution_exporter"
    }
}

/// Read a dump written by [`JsonSolutionExporter`].
pub fn read_solution_dump(path: &Path) -> MeniscusResult<SolutionDump> {
    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text)
        .map_err(|e| MeniscusError::Serialization(format!("JSON parse failed: {e}")))
}
