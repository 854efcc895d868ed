use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;
use tempfile::NamedTempFile;

use crate::aggregate::{AggregateRow, MatchResult};

use super::columns::{
    ALL_MATCHES_FILE, GLOBAL_MAXIMA_FILE, GROUP_TOTALS_FILE, PER_RAW_MAXIMA_FILE,
    PER_RAW_MAXIMA_WIDE_FILE, RUN_SUMMARY_FILE,
};
use super::groups::GroupTotals;
use super::long::write_long;
use super::summary::RunSummary;
use super::wide::WideTable;
use super::ReportError;

/// Writes report files into one output directory
///
/// Each file is written to a temporary file in the same directory and
/// persisted under its final name only once fully written, so a failed run
/// never leaves a truncated report behind.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    /// Create `output_dir` (and parents) if needed.
    pub fn create<P: AsRef<Path>>(output_dir: P) -> Result<Self, ReportError> {
        let output_dir = output_dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir).map_err(|e| ReportError::io(&output_dir, e))?;
        Ok(Self { output_dir })
    }

    /// The output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write every individual match.
    pub fn write_all_matches(&self, rows: &[MatchResult]) -> Result<PathBuf, ReportError> {
        self.write_atomic(ALL_MATCHES_FILE, |w| write_long(w, rows))
    }

    /// Write the per-raw-file maxima, long format.
    pub fn write_per_raw_maxima(&self, rows: &[AggregateRow]) -> Result<PathBuf, ReportError> {
        self.write_atomic(PER_RAW_MAXIMA_FILE, |w| write_long(w, rows))
    }

    /// Write the per-raw-file maxima, wide format.
    pub fn write_per_raw_wide(&self, table: &WideTable) -> Result<PathBuf, ReportError> {
        self.write_atomic(PER_RAW_MAXIMA_WIDE_FILE, |w| table.write_csv(w))
    }

    /// Write the global maxima.
    pub fn write_global_maxima(&self, rows: &[AggregateRow]) -> Result<PathBuf, ReportError> {
        self.write_atomic(GLOBAL_MAXIMA_FILE, |w| write_long(w, rows))
    }

    /// Write the mass-group totals.
    pub fn write_group_totals(&self, totals: &GroupTotals) -> Result<PathBuf, ReportError> {
        self.write_atomic(GROUP_TOTALS_FILE, |w| totals.write_csv(w))
    }

    /// Write the run summary as JSON.
    pub fn write_summary(&self, summary: &RunSummary) -> Result<PathBuf, ReportError> {
        self.write_atomic(RUN_SUMMARY_FILE, |w| {
            serde_json::to_writer_pretty(&mut *w, summary)?;
            w.write_all(b"\n")
                .map_err(|e| ReportError::io(RUN_SUMMARY_FILE, e))
        })
    }

    fn write_atomic<F>(&self, file_name: &str, write: F) -> Result<PathBuf, ReportError>
    where
        F: FnOnce(&mut BufWriter<&mut File>) -> Result<(), ReportError>,
    {
        let path = self.output_dir.join(file_name);
        let mut temp_file =
            NamedTempFile::new_in(&self.output_dir).map_err(|e| ReportError::io(&path, e))?;

        {
            let mut writer = BufWriter::new(temp_file.as_file_mut());
            write(&mut writer)?;
            writer.flush().map_err(|e| ReportError::io(&path, e))?;
        }

        temp_file
            .persist(&path)
            .map_err(|e| ReportError::io(&path, e.error))?;
        debug!("Wrote {}", path.display());
        Ok(path)
    }
}
