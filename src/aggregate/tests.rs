use super::*;
use crate::scan::{RawFileIndex, ScanRecord};
use crate::tolerance::{PpmTolerance, TargetMasses};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::{tempdir, TempDir};

fn write_scan(dir: &Path, name: &str, rows: &[(f64, f64)]) {
    fs::create_dir_all(dir).unwrap();
    let mut content = String::from("m/z,intensity\n");
    for (mz, intensity) in rows {
        content.push_str(&format!("{},{}\n", mz, intensity));
    }
    fs::write(dir.join(name), content).unwrap();
}

fn ppm(value: f64) -> PpmTolerance {
    PpmTolerance::new(value).unwrap()
}

/// Two raw files with overlapping masses.
fn two_run_fixture(a_max: f64, b_max: f64) -> TempDir {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_scan(&root.join("run_a"), "1.csv", &[(500.001, 10.0), (600.0, 5.0)]);
    write_scan(&root.join("run_a"), "2.csv", &[(500.002, a_max)]);
    write_scan(&root.join("run_b"), "1.csv", &[(499.999, b_max), (700.0, 1.0)]);
    dir
}

fn aggregator(root: &Path, masses: &[f64]) -> CrossRawAggregator {
    let index = RawFileIndex::discover(root).unwrap();
    CrossRawAggregator::new(index, TargetMasses::new(masses.iter().copied()).unwrap())
}

#[test]
fn test_max_intensity_prefers_first_on_tie() {
    let source = Arc::new(PathBuf::from("1.csv"));
    let records: Vec<ScanRecord> = [(500.001, 10.0), (500.002, 50.0), (499.999, 50.0)]
        .iter()
        .map(|&(mz, intensity)| ScanRecord {
            mz,
            intensity,
            source: Arc::clone(&source),
        })
        .collect();

    let best = max_intensity(&records).unwrap();
    assert_eq!(best.mz, 500.002);
    assert!(max_intensity(&Vec::<ScanRecord>::new()).is_none());
}

#[test]
fn test_aggregate_max_tie_break_in_load_order() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let run = dir.path().join("run");
    write_scan(&run, "1.csv", &[(500.001, 10.0), (500.002, 50.0)]);
    write_scan(&run, "2.csv", &[(499.999, 50.0)]);

    let row = RawFileAggregator::default()
        .aggregate_max(&run, 10.0, 500.0)?
        .expect("a match");

    assert_eq!(row.observed_mz, 500.002);
    assert_eq!(row.max_intensity, 50.0);
    assert_eq!(row.raw_file, "run");
    assert_eq!(row.source_name(), "1.csv");
    Ok(())
}

#[test]
fn test_aggregate_max_no_match_and_errors() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let run = dir.path().join("run");
    write_scan(&run, "1.csv", &[(700.0, 10.0)]);

    let aggregator = RawFileAggregator::default();
    assert!(aggregator.aggregate_max(&run, 10.0, 500.0)?.is_none());

    assert!(matches!(
        aggregator.aggregate_max(&run, -1.0, 500.0),
        Err(AggregateError::InvalidArgument(_))
    ));
    assert!(matches!(
        aggregator.aggregate_max(&run, 10.0, 0.0),
        Err(AggregateError::InvalidArgument(_))
    ));
    assert!(matches!(
        aggregator.aggregate_max(dir.path().join("missing"), 10.0, 500.0),
        Err(AggregateError::Scan(crate::scan::ScanError::NotFound(_)))
    ));
    Ok(())
}

#[test]
fn test_all_matches_order() {
    let dir = two_run_fixture(50.0, 80.0);
    let report = aggregator(dir.path(), &[600.0, 500.0]).all_matches(ppm(10.0));

    let rows: Vec<(f64, &str, f64)> = report
        .rows
        .iter()
        .map(|r| (r.target_mass.value(), r.raw_file.as_str(), r.observed_mz))
        .collect();

    assert_eq!(
        rows,
        vec![
            (500.0, "run_a", 500.001),
            (500.0, "run_a", 500.002),
            (500.0, "run_b", 499.999),
            (600.0, "run_a", 600.0),
        ]
    );
    assert!(report.is_complete());
}

#[test]
fn test_per_raw_maxima_omits_missing_pairs() {
    let dir = two_run_fixture(50.0, 80.0);
    let report = aggregator(dir.path(), &[500.0, 600.0, 900.0]).per_raw_maxima(ppm(10.0));

    let rows: Vec<(f64, &str, f64)> = report
        .rows
        .iter()
        .map(|r| (r.target_mass.value(), r.raw_file.as_str(), r.max_intensity))
        .collect();

    assert_eq!(
        rows,
        vec![(500.0, "run_a", 50.0), (500.0, "run_b", 80.0), (600.0, "run_a", 5.0)]
    );
}

#[test]
fn test_global_maxima_picks_highest() {
    let dir = two_run_fixture(50.0, 80.0);
    let report = aggregator(dir.path(), &[500.0, 900.0]).global_maxima(ppm(10.0));

    assert_eq!(report.len(), 1);
    assert_eq!(report.rows[0].raw_file, "run_b");
    assert_eq!(report.rows[0].max_intensity, 80.0);
}

#[test]
fn test_global_maxima_tie_goes_to_first_raw_file() {
    let dir = two_run_fixture(80.0, 80.0);
    let report = aggregator(dir.path(), &[500.0]).global_maxima(ppm(10.0));

    assert_eq!(report.rows[0].raw_file, "run_a");
    assert_eq!(report.rows[0].observed_mz, 500.002);
}

#[test]
fn test_global_maxima_empty_index() {
    let dir = tempdir().unwrap();
    let report = aggregator(dir.path(), &[500.0]).global_maxima(ppm(10.0));
    assert!(report.is_empty());
}

#[test]
fn test_parse_error_in_one_raw_file_is_isolated() {
    let dir = two_run_fixture(50.0, 80.0);
    fs::write(
        dir.path().join("run_b").join("0.csv"),
        "m/z,intensity\n499.9995,not-a-number\n",
    )
    .unwrap();

    let aggregator = aggregator(dir.path(), &[500.0]);
    let report = aggregator.per_raw_maxima(ppm(10.0));

    assert_eq!(report.len(), 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].raw_file, "run_b");
    assert!(report.failures[0].path.ends_with("0.csv"));
    assert_eq!(report.rows[0].raw_file, "run_a");
    assert_eq!(report.rows[0].max_intensity, 50.0);
    // run_b still contributes its readable scan file
    assert_eq!(report.rows[1].max_intensity, 80.0);
}

#[test]
fn test_modes_share_cached_loads() {
    let dir = two_run_fixture(50.0, 80.0);
    let aggregator = aggregator(dir.path(), &[500.0, 600.0, 700.0]);

    aggregator.all_matches(ppm(10.0));
    aggregator.per_raw_maxima(ppm(10.0));
    aggregator.global_maxima(ppm(5.0));

    assert_eq!(aggregator.cache().loads(), 2);

    aggregator.release();
    assert!(aggregator.cache().is_empty());
}

#[test]
fn test_modes_return_independent_tables() {
    let dir = two_run_fixture(50.0, 80.0);
    let aggregator = aggregator(dir.path(), &[500.0]);

    let global = aggregator.global_maxima(ppm(10.0));
    let all = aggregator.all_matches(ppm(10.0));
    let global_again = aggregator.global_maxima(ppm(10.0));

    assert_eq!(all.len(), 3);
    assert_eq!(global.rows, global_again.rows);
}
