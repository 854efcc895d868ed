use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, warn};

use super::index::scan_files_under;
use super::{ScanConfig, ScanError};

/// One observed (m/z, intensity) measurement and the scan file it came from
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRecord {
    /// Observed mass-to-charge ratio
    pub mz: f64,
    /// Observed intensity
    pub intensity: f64,
    /// Originating scan file, shared by every record of that file
    pub source: Arc<PathBuf>,
}

impl ScanRecord {
    /// File name of the originating scan file.
    pub fn source_name(&self) -> String {
        self.source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source.display().to_string())
    }
}

/// Records of one raw file, plus the scan files that could not be read
#[derive(Debug, Default)]
pub struct LoadedScans {
    /// Records in load order: scan files sorted by path, rows in file order
    pub records: Vec<ScanRecord>,
    /// One entry per scan file (or directory) whose contribution was dropped
    pub failures: Vec<ScanError>,
    /// Number of scan files read successfully
    pub files_read: usize,
}

/// Reads scan files into [`ScanRecord`]s
#[derive(Debug, Clone, Default)]
pub struct ScanLoader {
    config: ScanConfig,
}

impl ScanLoader {
    /// Loader with the default [`ScanConfig`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader with a custom configuration.
    pub fn with_config(config: ScanConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Load every scan file beneath `raw_file_dir`.
    ///
    /// Strict: the first malformed row fails the whole call with
    /// [`ScanError::Parse`]. Missing directories fail with [`ScanError::NotFound`].
    pub fn load<P: AsRef<Path>>(&self, raw_file_dir: P) -> Result<Vec<ScanRecord>, ScanError> {
        let dir = raw_file_dir.as_ref();
        if !dir.is_dir() {
            return Err(ScanError::NotFound(dir.to_path_buf()));
        }

        let mut records = Vec::new();
        for file in scan_files_under(dir, &self.config)? {
            records.extend(self.load_file(&file)?);
        }
        Ok(records)
    }

    /// Load every scan file beneath `raw_file_dir`, dropping the ones that fail.
    ///
    /// Each failing scan file contributes nothing and is reported in
    /// [`LoadedScans::failures`]; records from the other files are kept.
    pub fn load_partial<P: AsRef<Path>>(&self, raw_file_dir: P) -> LoadedScans {
        let dir = raw_file_dir.as_ref();
        let mut loaded = LoadedScans::default();

        if !dir.is_dir() {
            loaded.failures.push(ScanError::NotFound(dir.to_path_buf()));
            return loaded;
        }

        let files = match scan_files_under(dir, &self.config) {
            Ok(files) => files,
            Err(e) => {
                warn!("Failed to list scan files in {}: {}", dir.display(), e);
                loaded.failures.push(e);
                return loaded;
            }
        };

        for file in files {
            match self.load_file(&file) {
                Ok(records) => {
                    loaded.files_read += 1;
                    loaded.records.extend(records);
                }
                Err(e) => {
                    warn!("Dropping scan file: {}", e);
                    loaded.failures.push(e);
                }
            }
        }

        debug!(
            "Loaded {} records from {} scan files in {}",
            loaded.records.len(),
            loaded.files_read,
            dir.display()
        );
        loaded
    }

    /// Load a single scan file.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<ScanRecord>, ScanError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ScanError::io(path, e))?;
        self.parse_reader(BufReader::new(file), Arc::new(path.to_path_buf()))
    }

    /// Parse scan records from any reader, tagging each with `source`.
    pub fn parse_reader<R: Read>(
        &self,
        reader: R,
        source: Arc<PathBuf>,
    ) -> Result<Vec<ScanRecord>, ScanError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .has_headers(self.config.has_header)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        let mut row = csv::ByteRecord::new();

        loop {
            let more = csv_reader.read_byte_record(&mut row).map_err(|e| ScanError::Csv {
                path: source.to_path_buf(),
                source: e,
            })?;
            if !more {
                break;
            }
            // whitespace-only line
            if row.len() == 1 && row[0].is_empty() {
                continue;
            }

            let line = row.position().map(|p| p.line()).unwrap_or(0);
            let parse_error = || ScanError::Parse {
                file: source.to_path_buf(),
                line,
                text: row_text(&row, self.config.delimiter),
            };

            if row.len() < 2 {
                return Err(parse_error());
            }
            let mz = parse_field(&row[0]).ok_or_else(parse_error)?;
            let intensity = parse_field(&row[1]).ok_or_else(parse_error)?;

            records.push(ScanRecord {
                mz,
                intensity,
                source: Arc::clone(&source),
            });
        }

        Ok(records)
    }
}

fn parse_field(field: &[u8]) -> Option<f64> {
    std::str::from_utf8(field)
        .ok()?
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn row_text(row: &csv::ByteRecord, delimiter: u8) -> String {
    let delimiter = (delimiter as char).to_string();
    row.iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect::<Vec<_>>()
        .join(&delimiter)
}
