//! # Raw-File Discovery and Scan Loading
//!
//! A raw file (one instrument run) is a directory of scan files. Each scan
//! file is a small delimited table: a header row followed by
//! `m/z, intensity` rows.
//!
//! ```text
//! scans/
//! ├── run_A/            # raw file "run_A"
//! │   ├── 1.csv
//! │   └── 2.csv
//! └── run_B/
//!     └── 7.csv
//! ```
//!
//! ## Ordering
//!
//! Raw files are visited sorted by path and scan files are loaded sorted by
//! path, so every downstream tie-break is reproducible across runs.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ifishmass::scan::{RawFileIndex, ScanLoader};
//!
//! let index = RawFileIndex::discover("scans")?;
//! let loader = ScanLoader::new();
//! for raw_file in index.raw_files() {
//!     let records = loader.load(&raw_file.path)?;
//!     println!("{}: {} records", raw_file.name, records.len());
//! }
//! # Ok::<(), ifishmass::scan::ScanError>(())
//! ```

mod cache;
mod config;
mod error;
mod index;
mod loader;


pub use cache::ScanCache;
pub use config::{ScanConfig, DEFAULT_SCAN_EXTENSION};
pub use error::ScanError;
pub use index::{RawFile, RawFileIndex};
pub use loader::{LoadedScans, ScanLoader, ScanRecord};
