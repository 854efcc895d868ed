use std::path::PathBuf;

/// Errors that can occur while reshaping or writing reports
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Long input holds more than one row for a (sample, mass) pair
    #[error("Duplicate pivot key: sample '{sample}', mass {mass}")]
    DuplicateKey {
        /// Sample identifier
        sample: String,
        /// Target mass
        mass: f64,
    },

    /// I/O error creating or persisting a report file
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Report path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
