//! Two-column time series for gnuplot.
//!
//! Rows are `t value`, one per line, written with a fixed number of
//! significant digits into `<dir>/<name>.dat`.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use meniscus_types::{MeniscusError, MeniscusResult};

/// Default number of significant digits.
pub const DEFAULT_PRECISION: usize = 12;

/// Buffers `(t, value)` pairs and writes them on [`finalize`](Self::finalize).
#[derive(Debug, Clone)]
pub struct GnuplotWriter {
    name: String,
    precision: usize,
    values: Vec<(f64, f64)>,
}

impl GnuplotWriter {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_precision(name, DEFAULT_PRECISION)
    }

    pub fn with_precision(name: impl Into<String>, precision: usize) -> Self {
        Self {
            name: name.into(),
            precision: precision.max(1),
            values: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add(&mut self, t: f64, value: f64) {
        self.values.push((t, value));
    }

    pub fn values(&self) -> &[(f64, f64)] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Write rows to any writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> MeniscusResult<()> {
        let digits = self.precision - 1;
        for &(t, value) in &self.values {
            writeln!(writer, "{t:.digits$e} {value:.digits$e}")?;
        }
        Ok(())
    }

    /// Write `<dir>/<name>.dat`, creating `dir` if needed. Returns the file path.
    pub fn finalize(&self, dir: &Path) -> MeniscusResult<PathBuf> {
        if self.name.is_empty() || self.name.contains(['/', '\\']) {
            return Err(MeniscusError::InvalidConfig(format!(
                "Invalid series name '{}'",
                self.name
            )));
        }
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.dat", self.name));
        let mut writer = BufWriter::new(File::create(&path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(path)
    }
}
