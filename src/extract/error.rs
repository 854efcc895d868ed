use std::path::PathBuf;

/// Errors that can occur while extracting spectra into scan files
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// Spectrum or run name cannot be written as a scan file
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// I/O error creating a run directory or scan file
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ExtractError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
