//! Observer recording interface statistics as time series.

use std::path::{Path, PathBuf};

use meniscus_mesh::statistics::{average_radius, element_ratio, enclosed_volume, interface_measure};
use meniscus_math::DVec3;
use meniscus_solver::{EvolutionObserver, EvolutionReport, StepSnapshot};
use meniscus_types::MeniscusResult;

use crate::gnuplot::GnuplotWriter;

/// Records, at every snapshot:
///
/// | series | quantity |
/// |---|---|
/// | `interface_volume` | total cell measure (length or area) |
/// | `entity_ratio` | largest over smallest cell measure |
/// | `average_radius` | mean vertex distance to `center` |
/// | `enclosed_volume` | signed area (2D) or volume (3D) |
///
/// Each series is written to `<output_dir>/<name>.dat` at run end.
pub struct StatisticsRecorder {
    output_dir: PathBuf,
    center: DVec3,
    measure: GnuplotWriter,
    ratio: GnuplotWriter,
    radius: GnuplotWriter,
    volume: GnuplotWriter,
    written: Vec<PathBuf>,
}

impl StatisticsRecorder {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            center: DVec3::ZERO,
            measure: GnuplotWriter::new("interface_volume"),
            ratio: GnuplotWriter::new("entity_ratio"),
            radius: GnuplotWriter::new("average_radius"),
            volume: GnuplotWriter::new("enclosed_volume"),
            written: Vec::new(),
        }
    }

    /// Center used for the average radius (origin by default).
    pub fn with_center(mut self, center: DVec3) -> Self {
        self.center = center;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn series(&self) -> [&GnuplotWriter; 4] {
        [&self.measure, &self.ratio, &self.radius, &self.volume]
    }

    /// Files written by the last `on_run_end`.
    pub fn written_files(&self) -> &[PathBuf] {
        &self.written
    }
}

impl EvolutionObserver for StatisticsRecorder {
    fn on_snapshot(&mut self, snapshot: &StepSnapshot<'_>) -> MeniscusResult<()> {
        let t = snapshot.time;
        let mesh = snapshot.mesh;
        self.measure.add(t, interface_measure(mesh));
        self.ratio.add(t, element_ratio(mesh));
        self.radius.add(t, average_radius(mesh, self.center));
        self.volume.add(t, enclosed_volume(mesh));
        Ok(())
    }

    fn on_run_end(&mut self, _report: &EvolutionReport) -> MeniscusResult<()> {
        self.written.clear();
        for series in [&self.measure, &self.ratio, &self.radius, &self.volume] {
            let path = series.finalize(&self.output_dir)?;
            tracing::debug!("Wrote {} ({} rows)", path.display(), series.len());
            self.written.push(path);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "statistics_recorder"
    }
}
