//! # End-to-end Run
//!
//! Discovers raw files, computes every report, and writes them to the output
//! directory. Nothing is written until all aggregation has finished.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ifishmass::pipeline::{Pipeline, PipelineConfig};
//!
//! let config = PipelineConfig::new("scans", "reports", 10.0, vec![881.39739, 587.93404]);
//! let summary = Pipeline::run(&config)?;
//! println!("{}", summary);
//! # Ok::<(), ifishmass::pipeline::PipelineError>(())
//! ```

use std::path::PathBuf;

use chrono::Utc;
use log::{debug, info, warn};

use crate::aggregate::CrossRawAggregator;
use crate::report::{
    group_totals, to_wide, MassGroups, PivotEntry, ReportCounts, ReportError, ReportWriter,
    RunSummary,
};
use crate::scan::{RawFileIndex, ScanConfig, ScanError, ScanLoader};
use crate::tolerance::{MatchError, PpmTolerance, TargetMasses};

/// Errors that stop a run
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Tolerance or a mass list is out of range
    #[error(transparent)]
    InvalidArgument(#[from] MatchError),

    /// Data folder is missing or unreadable
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// A report could not be reshaped or written
    #[error(transparent)]
    Report(#[from] ReportError),

    /// The worker thread pool could not be started
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

/// Settings of one run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Root directory holding one sub-directory per raw file
    pub data_folder: PathBuf,
    /// Directory the reports are written to
    pub output_dir: PathBuf,
    /// Matching tolerance in ppm
    pub tolerance: f64,
    /// Target masses, in any order, duplicates allowed
    pub masses: Vec<f64>,
    /// Mass groups summed per sample; totals are written only when all three are set
    pub internal_standard: Vec<f64>,
    /// Modified peptide masses
    pub modified_peptides: Vec<f64>,
    /// Unmodified peptide masses
    pub unmodified_peptides: Vec<f64>,
    /// Scan-file format
    pub scan: ScanConfig,
    /// Worker threads; `None` uses the global rayon pool
    pub threads: Option<usize>,
}

impl PipelineConfig {
    /// Config without mass groups, default scan format and thread count.
    pub fn new(
        data_folder: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        tolerance: f64,
        masses: Vec<f64>,
    ) -> Self {
        Self {
            data_folder: data_folder.into(),
            output_dir: output_dir.into(),
            tolerance,
            masses,
            internal_standard: Vec::new(),
            modified_peptides: Vec::new(),
            unmodified_peptides: Vec::new(),
            scan: ScanConfig::default(),
            threads: None,
        }
    }

    /// Set the three mass groups.
    pub fn with_groups(
        mut self,
        internal_standard: Vec<f64>,
        modified_peptides: Vec<f64>,
        unmodified_peptides: Vec<f64>,
    ) -> Self {
        self.internal_standard = internal_standard;
        self.modified_peptides = modified_peptides;
        self.unmodified_peptides = unmodified_peptides;
        self
    }
}

/// Runs the whole search
pub struct Pipeline;

struct Validated {
    tolerance: PpmTolerance,
    masses: TargetMasses,
    groups: MassGroups,
}

impl Pipeline {
    /// Execute a run and return its summary.
    ///
    /// Invalid arguments and a missing data folder fail the run. Unreadable
    /// scan files do not: they are listed in [`RunSummary::failures`].
    pub fn run(config: &PipelineConfig) -> Result<RunSummary, PipelineError> {
        let validated = Validated {
            tolerance: PpmTolerance::new(config.tolerance)?,
            masses: TargetMasses::new(config.masses.iter().copied())?,
            groups: MassGroups::new(
                &config.internal_standard,
                &config.modified_peptides,
                &config.unmodified_peptides,
            )?,
        };

        match config.threads {
            #[cfg(feature = "parallel")]
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| PipelineError::ThreadPool(e.to_string()))?;
                debug!("Running on {} worker threads", threads);
                pool.install(|| execute(config, validated))
            }
            #[cfg(not(feature = "parallel"))]
            Some(threads) => {
                debug!("Ignoring threads = {}: built without parallel support", threads);
                execute(config, validated)
            }
            None => execute(config, validated),
        }
    }
}

fn execute(config: &PipelineConfig, validated: Validated) -> Result<RunSummary, PipelineError> {
    let Validated {
        tolerance,
        masses,
        groups,
    } = validated;

    let index = RawFileIndex::discover_with(&config.data_folder, &config.scan)?;
    let raw_files = index.len();
    if raw_files == 0 {
        warn!(
            "No raw files with .{} scan files under {}",
            config.scan.extension,
            config.data_folder.display()
        );
    }
    info!(
        "Searching {} masses in {} raw files at {}",
        masses.len(),
        raw_files,
        tolerance
    );

    let aggregator = CrossRawAggregator::with_loader(
        index,
        masses.clone(),
        ScanLoader::with_config(config.scan.clone()),
    );
    let all_matches = aggregator.all_matches(tolerance);
    let per_raw = aggregator.per_raw_maxima(tolerance);
    let global = aggregator.global_maxima(tolerance);
    aggregator.release();

    let wide = to_wide(per_raw.rows.iter().map(PivotEntry::from))?;
    let totals = if groups.is_complete() {
        Some(group_totals(&wide, &groups))
    } else {
        debug!("Skipping group totals: not every mass group is set");
        None
    };

    let writer = ReportWriter::create(&config.output_dir)?;
    let mut outputs = vec![
        writer.write_all_matches(&all_matches.rows)?,
        writer.write_per_raw_maxima(&per_raw.rows)?,
        writer.write_per_raw_wide(&wide)?,
        writer.write_global_maxima(&global.rows)?,
    ];
    if let Some(totals) = &totals {
        outputs.push(writer.write_group_totals(totals)?);
    }

    let summary = RunSummary {
        data_folder: config.data_folder.clone(),
        output_dir: config.output_dir.clone(),
        tolerance,
        masses: masses.as_slice().to_vec(),
        raw_files,
        counts: ReportCounts {
            all_matches: all_matches.len(),
            per_raw_maxima: per_raw.len(),
            wide_samples: wide.len(),
            global_maxima: global.len(),
            group_totals: totals.as_ref().map(|t| t.rows.len()),
        },
        absent_group_masses: totals.map(|t| t.absent).unwrap_or_default(),
        failures: all_matches.failures,
        outputs,
        finished_at: Utc::now(),
    };
    writer.write_summary(&summary)?;

    info!("Wrote {} reports to {}", summary.outputs.len(), config.output_dir.display());
    Ok(summary)
}
