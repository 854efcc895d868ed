use std::path::Path;

use crate::scan::{ScanLoader, ScanRecord};
use crate::tolerance::{PpmTolerance, PpmWindow, TargetMass};

use super::{AggregateError, AggregateRow, MatchResult};

/// Highest-intensity record, the earliest one on ties.
///
/// Records are scanned in iteration order and only a strictly greater
/// intensity replaces the current best.
pub fn max_intensity<'a, I>(records: I) -> Option<&'a ScanRecord>
where
    I: IntoIterator<Item = &'a ScanRecord>,
{
    let mut best: Option<&ScanRecord> = None;
    for record in records {
        match best {
            Some(current) if record.intensity <= current.intensity => {}
            _ => best = Some(record),
        }
    }
    best
}

/// Best match for `window` among `records`, tagged with `raw_file`.
pub(crate) fn best_match(
    window: &PpmWindow,
    raw_file: &str,
    records: &[ScanRecord],
) -> Option<AggregateRow> {
    max_intensity(window.filter(records))
        .map(|record| MatchResult::new(window.target, raw_file, record).into())
}

/// Reduces one raw file to its maximum-intensity match for a target mass
#[derive(Debug, Clone, Default)]
pub struct RawFileAggregator {
    loader: ScanLoader,
}

impl RawFileAggregator {
    /// Aggregator reading scan files through `loader`.
    pub fn new(loader: ScanLoader) -> Self {
        Self { loader }
    }

    /// Highest-intensity record of `raw_file_dir` within `tolerance` ppm of `target_mass`.
    ///
    /// Returns `Ok(None)` when nothing matches. Ties resolve to the record
    /// loaded first. Any unreadable or malformed scan file fails the call.
    pub fn aggregate_max<P: AsRef<Path>>(
        &self,
        raw_file_dir: P,
        tolerance: f64,
        target_mass: f64,
    ) -> Result<Option<AggregateRow>, AggregateError> {
        let window = PpmWindow::new(TargetMass::new(target_mass)?, PpmTolerance::new(tolerance)?);
        let dir = raw_file_dir.as_ref();
        let records = self.loader.load(dir)?;

        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| dir.display().to_string());

        Ok(best_match(&window, &name, &records))
    }
}
