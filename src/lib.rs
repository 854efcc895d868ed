//! # iFishMass - Targeted m/z Search Across Raw Files
//!
//! `ifishmass` searches mass spectrometry scan data for a list of target
//! masses within a ppm tolerance and reports the matching intensities per
//! sample.
//!
//! ## Input Layout
//!
//! ```text
//! scans/                 data folder
//! ├── sample_01/         one raw file (sample)
//! │   ├── 1.csv          one scan: m/z,intensity rows
//! │   └── 2.csv
//! └── sample_02/
//!     └── 1.csv
//! ```
//!
//! Every scan file starts with a header row; the first two columns of the
//! following rows are m/z and intensity.
//!
//! ## Reports
//!
//! | File | Content |
//! |------|---------|
//! | `intensities_among_all_raw.csv` | every match |
//! | `highest_intensities_per_raw.csv` | highest intensity per (mass, sample) |
//! | `highest_intensities_per_raw_wide.csv` | the same, one row per sample |
//! | `highest_intensities_among_all_raw.csv` | highest intensity per mass |
//! | `group_totals.csv` | per-sample mass-group totals (optional) |
//! | `run_summary.json` | run parameters, counts and dropped scan files |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ifishmass::prelude::*;
//!
//! let config = PipelineConfig::new("scans", "reports", 10.0, vec![881.39739, 587.93404]);
//! let summary = Pipeline::run(&config)?;
//! println!("{}", summary);
//! # Ok::<(), PipelineError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`tolerance`]: target masses, ppm tolerances and the matching predicate
//! - [`scan`]: raw-file discovery, scan-file parsing and the per-run cache
//! - [`aggregate`]: all-matches, per-raw-file and global maxima
//! - [`report`]: long and wide CSV reports, mass groups and the run summary
//! - [`extract`]: writing decoded spectra as scan files
//! - [`pipeline`]: the end-to-end run

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod aggregate;
pub mod extract;
pub mod pipeline;
pub mod report;
pub mod scan;
pub mod tolerance;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::aggregate::{
        AggregateError, AggregateReport, AggregateRow, CrossRawAggregator, LoadFailure,
        MatchResult, RawFileAggregator,
    };
    pub use crate::extract::{ExtractConfig, ExtractError, ExtractStats, ScanExtractor, Spectrum};
    pub use crate::pipeline::{Pipeline, PipelineConfig, PipelineError};
    pub use crate::report::{
        to_wide, ColumnPresence, MassGroups, PivotEntry, ReportError, ReportWriter, RunSummary,
        WideTable,
    };
    pub use crate::scan::{RawFile, RawFileIndex, ScanConfig, ScanError, ScanLoader, ScanRecord};
    pub use crate::tolerance::{
        match_within, MatchError, PpmTolerance, PpmWindow, TargetMass, TargetMasses,
    };
}
