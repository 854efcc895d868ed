use log::info;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::scan::{LoadedScans, RawFile, RawFileIndex, ScanCache, ScanLoader};
use crate::tolerance::{PpmTolerance, PpmWindow, TargetMass, TargetMasses};

use super::raw_file::best_match;
use super::{AggregateReport, AggregateRow, LoadFailure, MatchResult};

/// Runs matching and reduction over every (target mass, raw file) pair
///
/// Masses are visited in ascending order and raw files in index (path)
/// order. Each raw file is read from disk once per aggregator and shared
/// between report modes through a [`ScanCache`].
#[derive(Debug)]
pub struct CrossRawAggregator {
    index: RawFileIndex,
    masses: TargetMasses,
    cache: ScanCache,
}

impl CrossRawAggregator {
    /// Aggregator over `index` for `masses`, using the default loader.
    pub fn new(index: RawFileIndex, masses: TargetMasses) -> Self {
        Self::with_loader(index, masses, ScanLoader::new())
    }

    /// Aggregator over `index` for `masses`, reading scans through `loader`.
    pub fn with_loader(index: RawFileIndex, masses: TargetMasses, loader: ScanLoader) -> Self {
        Self {
            index,
            masses,
            cache: ScanCache::new(loader),
        }
    }

    /// The raw files being aggregated.
    pub fn index(&self) -> &RawFileIndex {
        &self.index
    }

    /// The target masses, in visitation order.
    pub fn masses(&self) -> &TargetMasses {
        &self.masses
    }

    /// The per-run scan cache.
    pub fn cache(&self) -> &ScanCache {
        &self.cache
    }

    /// Drop cached scan records once all reports are computed.
    pub fn release(&self) {
        self.cache.clear();
    }

    /// Every individual match, ordered by mass, then raw file, then load order.
    pub fn all_matches(&self, tolerance: PpmTolerance) -> AggregateReport<MatchResult> {
        let rows: Vec<MatchResult> = self
            .evaluate(tolerance, |window, raw_file, loaded| {
                window
                    .filter(&loaded.records)
                    .map(|record| MatchResult::new(window.target, &raw_file.name, record))
                    .collect::<Vec<_>>()
            })
            .into_iter()
            .flatten()
            .collect();

        info!("all_matches: {} rows at {}", rows.len(), tolerance);
        self.report(rows)
    }

    /// The highest-intensity match per (mass, raw file) pair.
    ///
    /// Raw files without a match for a mass contribute no row.
    pub fn per_raw_maxima(&self, tolerance: PpmTolerance) -> AggregateReport<AggregateRow> {
        let rows: Vec<AggregateRow> = self
            .evaluate(tolerance, |window, raw_file, loaded| {
                best_match(window, &raw_file.name, &loaded.records)
            })
            .into_iter()
            .flatten()
            .collect();

        info!("per_raw_maxima: {} rows at {}", rows.len(), tolerance);
        self.report(rows)
    }

    /// The highest-intensity match per mass across every raw file.
    ///
    /// Ties go to the raw file visited first, then to the record loaded
    /// first. Masses without any match are omitted.
    pub fn global_maxima(&self, tolerance: PpmTolerance) -> AggregateReport<AggregateRow> {
        let raw_count = self.index.len();
        if raw_count == 0 {
            return self.report(Vec::new());
        }

        let per_pair = self.evaluate(tolerance, |window, raw_file, loaded| {
            best_match(window, &raw_file.name, &loaded.records)
        });

        let rows: Vec<AggregateRow> = per_pair
            .chunks(raw_count)
            .filter_map(|candidates| {
                let mut best: Option<&AggregateRow> = None;
                for candidate in candidates.iter().flatten() {
                    match best {
                        Some(current) if candidate.max_intensity <= current.max_intensity => {}
                        _ => best = Some(candidate),
                    }
                }
                best.cloned()
            })
            .collect();

        info!("global_maxima: {} rows at {}", rows.len(), tolerance);
        self.report(rows)
    }

    /// Evaluate `f` for every (mass, raw file) pair, mass-major, in order.
    fn evaluate<T, F>(&self, tolerance: PpmTolerance, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(&PpmWindow, &RawFile, &LoadedScans) -> T + Sync + Send,
    {
        let pairs: Vec<(TargetMass, &RawFile)> = self
            .masses
            .iter()
            .flat_map(|mass| self.index.raw_files().iter().map(move |raw| (*mass, raw)))
            .collect();

        let run = |&(mass, raw_file): &(TargetMass, &RawFile)| {
            let loaded = self.cache.get_or_load(&raw_file.path);
            f(&PpmWindow::new(mass, tolerance), raw_file, loaded.as_ref())
        };

        #[cfg(feature = "parallel")]
        let results: Vec<T> = pairs.par_iter().map(run).collect();
        #[cfg(not(feature = "parallel"))]
        let results: Vec<T> = pairs.iter().map(run).collect();

        results
    }

    fn report<R>(&self, rows: Vec<R>) -> AggregateReport<R> {
        AggregateReport {
            rows,
            failures: self.failures(),
        }
    }

    /// Load failures of every raw file, in visitation order.
    fn failures(&self) -> Vec<LoadFailure> {
        self.index
            .raw_files()
            .iter()
            .flat_map(|raw_file| {
                let loaded = self.cache.get_or_load(&raw_file.path);
                loaded
                    .failures
                    .iter()
                    .map(|error| LoadFailure::new(raw_file, error))
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}
