use std::path::PathBuf;

/// Errors that can occur while discovering or loading scan files
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Root or raw-file directory is missing or is not a directory
    #[error("Directory not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Malformed scan record row
    #[error("Parse error in {} line {line}: {text}", file.display())]
    Parse {
        /// Scan file containing the row
        file: PathBuf,
        /// 1-based line number of the row
        line: u64,
        /// Offending row text
        text: String,
    },

    /// I/O error reading a directory or scan file
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// CSV framing error (e.g. invalid UTF-8) in a scan file
    #[error("CSV error in {}: {source}", path.display())]
    Csv {
        /// Scan file being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: csv::Error,
    },
}

impl ScanError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The scan file or directory the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            ScanError::NotFound(path) => path,
            ScanError::Parse { file, .. } => file,
            ScanError::Io { path, .. } => path,
            ScanError::Csv { path, .. } => path,
        }
    }
}
