use std::fmt;

/// Statistics from extracting one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// Spectra offered to the extractor
    pub spectra_seen: usize,
    /// Spectra skipped because of their MS level
    pub skipped_ms_level: usize,
    /// Spectra with no peak left after filtering
    pub skipped_empty: usize,
    /// Scan files written
    pub scans_written: usize,
    /// Peaks written across all scan files
    pub peaks_written: usize,
}

impl fmt::Display for ExtractStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} scan files ({} peaks) from {} spectra; skipped {} by MS level, {} empty",
            self.scans_written,
            self.peaks_written,
            self.spectra_seen,
            self.skipped_ms_level,
            self.skipped_empty
        )
    }
}
