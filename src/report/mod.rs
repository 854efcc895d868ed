//! # Reports
//!
//! Turns aggregation results into the CSV and JSON files of a run.
//!
//! Long-format reports share the header
//!
//! ```text
//! M/Z,EXPERIMENTAL_M/Z,INTENSITY,SAMPLE,FILE
//! ```
//!
//! The per-raw-file maxima are also pivoted into a wide table with one row per
//! sample and one `<mass>-M/Z` column per target mass. Cells with no match
//! hold `0`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ifishmass::aggregate::CrossRawAggregator;
//! use ifishmass::report::{to_wide, PivotEntry, ReportWriter};
//! use ifishmass::scan::RawFileIndex;
//! use ifishmass::tolerance::{PpmTolerance, TargetMasses};
//!
//! let index = RawFileIndex::discover("scans")?;
//! let masses = TargetMasses::new([881.39739, 587.93404])?;
//! let aggregator = CrossRawAggregator::new(index, masses);
//! let per_raw = aggregator.per_raw_maxima(PpmTolerance::new(10.0)?);
//!
//! let wide = to_wide(per_raw.rows.iter().map(PivotEntry::from))?;
//! let writer = ReportWriter::create("reports")?;
//! writer.write_per_raw_maxima(&per_raw.rows)?;
//! writer.write_per_raw_wide(&wide)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod columns;
mod error;
mod groups;
mod long;
mod summary;
mod wide;
mod writer;

pub use error::ReportError;
pub use groups::{group_totals, GroupTotals, GroupTotalsRow, MassGroups};
pub use long::{write_long, LongRow};
pub use summary::{ReportCounts, RunSummary};
pub use wide::{to_wide, ColumnPresence, PivotEntry, WideTable};
pub use writer::ReportWriter;

/// Shortest round-trip rendering, so identical input gives identical bytes.
pub(crate) fn format_value(value: f64) -> String {
    value.to_string()
}
