use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::scan::{RawFile, ScanError, ScanRecord};
use crate::tolerance::TargetMass;

/// One observation within tolerance of a target mass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    /// Target mass that was searched for
    pub target_mass: TargetMass,
    /// Observed m/z of the matching record
    pub observed_mz: f64,
    /// Observed intensity of the matching record
    pub intensity: f64,
    /// Sample identifier of the raw file
    pub raw_file: String,
    /// Scan file the record came from
    pub source_file: PathBuf,
}

impl MatchResult {
    pub(crate) fn new(target_mass: TargetMass, raw_file: &str, record: &ScanRecord) -> Self {
        Self {
            target_mass,
            observed_mz: record.mz,
            intensity: record.intensity,
            raw_file: raw_file.to_string(),
            source_file: record.source.to_path_buf(),
        }
    }

    /// File name of the originating scan file.
    pub fn source_name(&self) -> String {
        file_name(&self.source_file)
    }
}

/// The highest-intensity match for one (target mass, raw file) pair,
/// or for one target mass across all raw files
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    /// Target mass that was searched for
    pub target_mass: TargetMass,
    /// Observed m/z of the selected record
    pub observed_mz: f64,
    /// Intensity of the selected record
    pub max_intensity: f64,
    /// Sample identifier of the raw file holding the selected record
    pub raw_file: String,
    /// Scan file holding the selected record
    pub source_file: PathBuf,
}

impl AggregateRow {
    /// File name of the originating scan file.
    pub fn source_name(&self) -> String {
        file_name(&self.source_file)
    }
}

impl From<MatchResult> for AggregateRow {
    fn from(m: MatchResult) -> Self {
        Self {
            target_mass: m.target_mass,
            observed_mz: m.observed_mz,
            max_intensity: m.intensity,
            raw_file: m.raw_file,
            source_file: m.source_file,
        }
    }
}

/// A scan file (or raw-file directory) whose contribution was dropped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadFailure {
    /// Sample identifier of the affected raw file
    pub raw_file: String,
    /// Failing scan file or directory
    pub path: PathBuf,
    /// Human-readable error
    pub message: String,
}

impl LoadFailure {
    pub(crate) fn new(raw_file: &RawFile, error: &ScanError) -> Self {
        Self {
            raw_file: raw_file.name.clone(),
            path: error.path().to_path_buf(),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.raw_file, self.message)
    }
}

/// Rows of one report mode, plus the load failures met while computing it
///
/// A failure is never a row: a raw file with no match and a raw file whose
/// scan files could not be read are told apart through `failures`.
#[derive(Debug, Clone)]
pub struct AggregateReport<R> {
    /// Report rows in deterministic order
    pub rows: Vec<R>,
    /// Dropped scan files, in raw-file visitation order
    pub failures: Vec<LoadFailure>,
}

impl<R> AggregateReport<R> {
    /// True when no scan file was dropped.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the report has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
