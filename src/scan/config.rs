use std::path::Path;

/// Default scan file extension (compared case-insensitively)
pub const DEFAULT_SCAN_EXTENSION: &str = "csv";

/// Configuration shared by raw-file discovery and scan loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Scan file extension without the leading dot
    pub extension: String,

    /// Field delimiter of scan files
    pub delimiter: u8,

    /// Whether the first row of every scan file is a header to skip
    pub has_header: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_SCAN_EXTENSION.to_string(),
            delimiter: b',',
            has_header: true,
        }
    }
}

impl ScanConfig {
    /// Use a different scan file extension. A leading dot is ignored.
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Whether `path` names a scan file.
    pub fn is_scan_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(&self.extension))
            .unwrap_or(false)
    }
}
