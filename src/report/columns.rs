//! Report file names and column headers.

/// Every individual match, long format
pub const ALL_MATCHES_FILE: &str = "intensities_among_all_raw.csv";
/// Highest intensity per (mass, raw file), long format
pub const PER_RAW_MAXIMA_FILE: &str = "highest_intensities_per_raw.csv";
/// Highest intensity per (mass, raw file), wide format
pub const PER_RAW_MAXIMA_WIDE_FILE: &str = "highest_intensities_per_raw_wide.csv";
/// Highest intensity per mass across all raw files, long format
pub const GLOBAL_MAXIMA_FILE: &str = "highest_intensities_among_all_raw.csv";
/// Per-sample mass-group totals
pub const GROUP_TOTALS_FILE: &str = "group_totals.csv";
/// Machine-readable run summary
pub const RUN_SUMMARY_FILE: &str = "run_summary.json";

/// Target mass
pub const MZ: &str = "M/Z";
/// Observed m/z
pub const EXPERIMENTAL_MZ: &str = "EXPERIMENTAL_M/Z";
/// Observed (or maximum) intensity
pub const INTENSITY: &str = "INTENSITY";
/// Sample identifier (raw-file name)
pub const SAMPLE: &str = "SAMPLE";
/// Scan file name
pub const FILE: &str = "FILE";

/// Header of every long-format report
pub const LONG_HEADER: [&str; 5] = [MZ, EXPERIMENTAL_MZ, INTENSITY, SAMPLE, FILE];

/// Suffix appended to a mass to label its wide-format column
pub const MASS_COLUMN_SUFFIX: &str = "-M/Z";

/// Internal standard group total
pub const INTERNAL_STANDARD: &str = "INTERNAL_STANDARD";
/// Modified peptide group total
pub const MODIFIED_PEPTIDE: &str = "MODIFIED_PEPTIDE";
/// Unmodified peptide group total
pub const UNMODIFIED_PEPTIDE: &str = "UNMODIFIED_PEPTIDE";

/// Column label of a mass in the wide table, e.g. `881.39739-M/Z`.
pub fn mass_column(mass: f64) -> String {
    format!("{}{}", mass, MASS_COLUMN_SUFFIX)
}
