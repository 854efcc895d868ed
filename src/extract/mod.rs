//! # Scan Extraction
//!
//! Writes decoded spectra as per-scan files in the layout the [`scan`]
//! module reads: one directory per run, one `<scan number>.csv` per spectrum,
//! each with an `m/z,intensity` header.
//!
//! Spectra can be restricted to one MS level and filtered down to the peaks
//! near a set of target masses. Without masses every peak is written.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use ifishmass::extract::{ExtractConfig, ScanExtractor, Spectrum};
//! use ifishmass::tolerance::{PpmTolerance, TargetMasses};
//!
//! let config = ExtractConfig::filtered(
//!     TargetMasses::new([881.39739])?,
//!     PpmTolerance::new(10.0)?,
//! );
//! let spectra = vec![Spectrum::new(1, 1, vec![881.3975, 900.0], vec![120.0, 3.0])];
//!
//! let stats = ScanExtractor::new(config).extract_run("sample_01", spectra, Path::new("scans"))?;
//! println!("{}", stats);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`scan`]: crate::scan

mod error;
mod extractor;
mod spectrum;
mod stats;

pub use error::ExtractError;
pub use extractor::{ExtractConfig, ScanExtractor, SCAN_FILE_HEADER};
pub use spectrum::{filter_peaks, Spectrum};
pub use stats::ExtractStats;

#[cfg(test)]
mod tests;
