//! # Peak Aggregation
//!
//! Reduces ppm matches to the three reporting granularities:
//!
//! 1. **All matches**: every record within tolerance, per mass and raw file.
//! 2. **Per-raw maxima**: the highest-intensity match per (mass, raw file).
//! 3. **Global maxima**: the highest-intensity match per mass over all raw files.
//!
//! ## Determinism
//!
//! Masses are visited in ascending order, raw files sorted by path and
//! records in load order. Maximum-intensity ties always resolve to the
//! first record met in that order, so repeated runs produce identical
//! reports even when the work is spread over a thread pool.
//!
//! ## Fault isolation
//!
//! A malformed scan file drops only that file's records. Every report
//! lists the dropped files in [`AggregateReport::failures`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use ifishmass::aggregate::CrossRawAggregator;
//! use ifishmass::scan::RawFileIndex;
//! use ifishmass::tolerance::{PpmTolerance, TargetMasses};
//!
//! let index = RawFileIndex::discover("scans")?;
//! let masses = TargetMasses::new([881.39739, 587.93404])?;
//! let aggregator = CrossRawAggregator::new(index, masses);
//!
//! let report = aggregator.per_raw_maxima(PpmTolerance::new(10.0)?);
//! for row in &report.rows {
//!     println!("{} {} {}", row.target_mass, row.raw_file, row.max_intensity);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod cross_raw;
mod error;
mod raw_file;
mod types;

#[cfg(test)]
mod tests;

pub use cross_raw::CrossRawAggregator;
pub use error::AggregateError;
pub use raw_file::{max_intensity, RawFileAggregator};
pub use types::{AggregateReport, AggregateRow, LoadFailure, MatchResult};
