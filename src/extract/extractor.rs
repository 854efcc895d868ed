use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Component, Path, PathBuf};

use log::{debug, info};

use crate::report::format_value;
use crate::tolerance::{PpmTolerance, TargetMasses};

use super::{filter_peaks, ExtractError, ExtractStats, Spectrum};

/// Header written to every extracted scan file
pub const SCAN_FILE_HEADER: [&str; 2] = ["m/z", "intensity"];

/// Which spectra are kept and how they are filtered
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Only spectra of this MS level are written; `None` keeps every level
    pub ms_level: Option<u8>,
    /// Peaks are kept when near one of these masses; `None` dumps every peak
    pub masses: Option<TargetMasses>,
    /// Filtering tolerance
    pub tolerance: PpmTolerance,
}

impl ExtractConfig {
    /// Filter around `masses` within `tolerance`, MS1 only.
    pub fn filtered(masses: TargetMasses, tolerance: PpmTolerance) -> Self {
        Self {
            ms_level: Some(1),
            masses: Some(masses),
            tolerance,
        }
    }

    /// Write every peak of every MS1 spectrum.
    pub fn dump() -> Self {
        Self {
            ms_level: Some(1),
            masses: None,
            tolerance: PpmTolerance::default(),
        }
    }

    /// Select a different MS level (`None` keeps every level).
    pub fn with_ms_level(mut self, ms_level: Option<u8>) -> Self {
        self.ms_level = ms_level;
        self
    }
}

/// Turns decoded spectra into per-scan files readable by the scan loader
///
/// Each kept spectrum of run `R` is written to `<output_root>/R/<scan>.csv`.
#[derive(Debug, Clone)]
pub struct ScanExtractor {
    config: ExtractConfig,
}

impl ScanExtractor {
    /// Create an extractor.
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }

    /// The extraction settings.
    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Extract one run.
    ///
    /// Spectra of other MS levels and spectra left empty by filtering are
    /// skipped. The run directory is created only when a scan file is
    /// written.
    pub fn extract_run<I>(
        &self,
        run_name: &str,
        spectra: I,
        output_root: &Path,
    ) -> Result<ExtractStats, ExtractError>
    where
        I: IntoIterator<Item = Spectrum>,
    {
        let run_dir = run_directory(output_root, run_name)?;
        let mut stats = ExtractStats::default();

        for spectrum in spectra {
            stats.spectra_seen += 1;
            spectrum.validate()?;

            if let Some(level) = self.config.ms_level {
                if spectrum.ms_level != level {
                    stats.skipped_ms_level += 1;
                    continue;
                }
            }

            let kept = match &self.config.masses {
                Some(masses) => filter_peaks(&spectrum, masses, self.config.tolerance),
                None => spectrum,
            };
            if kept.is_empty() {
                stats.skipped_empty += 1;
                continue;
            }

            if stats.scans_written == 0 {
                fs::create_dir_all(&run_dir).map_err(|e| ExtractError::io(&run_dir, e))?;
            }
            write_scan_file(&run_dir, &kept)?;
            stats.scans_written += 1;
            stats.peaks_written += kept.len();
        }

        info!("{}: {}", run_name, stats);
        Ok(stats)
    }
}

fn run_directory(output_root: &Path, run_name: &str) -> Result<PathBuf, ExtractError> {
    let mut components = Path::new(run_name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(output_root.join(run_name)),
        _ => Err(ExtractError::InvalidData(format!(
            "run name '{}' must be a single path component",
            run_name
        ))),
    }
}

fn write_scan_file(run_dir: &Path, spectrum: &Spectrum) -> Result<(), ExtractError> {
    let path = run_dir.join(format!("{}.csv", spectrum.scan_number));
    let file = File::create(&path).map_err(|e| ExtractError::io(&path, e))?;

    let mut writer = csv::Writer::from_writer(BufWriter::new(file));
    writer.write_record(SCAN_FILE_HEADER)?;
    for (mz, intensity) in spectrum.peaks() {
        writer.write_record([format_value(mz), format_value(intensity)])?;
    }
    writer.flush().map_err(|e| ExtractError::io(&path, e))?;

    debug!("Wrote {} peaks to {}", spectrum.len(), path.display());
    Ok(())
}
