use crate::scan::ScanError;
use crate::tolerance::MatchError;

/// Errors that can occur during aggregation
#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    /// Tolerance or target mass out of range
    #[error(transparent)]
    InvalidArgument(#[from] MatchError),

    /// Raw-file directory missing or scan file unreadable
    #[error(transparent)]
    Scan(#[from] ScanError),
}
