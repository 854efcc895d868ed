use super::*;
use crate::scan::{RawFileIndex, ScanLoader};
use crate::tolerance::{PpmTolerance, TargetMasses};
use std::fs;
use tempfile::tempdir;

fn ppm(value: f64) -> PpmTolerance {
    PpmTolerance::new(value).unwrap()
}

#[test]
fn test_filter_peaks_union_of_windows() {
    let spectrum = Spectrum::new(
        7,
        1,
        vec![499.999, 550.0, 600.004, 700.0],
        vec![1.0, 2.0, 3.0, 4.0],
    );
    let masses = TargetMasses::new([600.0, 500.0]).unwrap();

    let kept = filter_peaks(&spectrum, &masses, ppm(10.0));
    assert_eq!(kept.scan_number, 7);
    assert_eq!(kept.mz, vec![499.999, 600.004]);
    assert_eq!(kept.intensity, vec![1.0, 3.0]);
}

#[test]
fn test_filter_peaks_empty_result() {
    let spectrum = Spectrum::new(1, 1, vec![100.0], vec![1.0]);
    let masses = TargetMasses::new([500.0]).unwrap();
    assert!(filter_peaks(&spectrum, &masses, ppm(10.0)).is_empty());
}

#[test]
fn test_extract_run_writes_loadable_scan_files() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let masses = TargetMasses::new([500.0])?;
    let extractor = ScanExtractor::new(ExtractConfig::filtered(masses, ppm(10.0)));

    let spectra = vec![
        Spectrum::new(1, 1, vec![500.001, 800.0], vec![10.0, 99.0]),
        Spectrum::new(2, 2, vec![500.0], vec![1000.0]),
        Spectrum::new(3, 1, vec![800.0], vec![5.0]),
        Spectrum::new(4, 1, vec![499.998], vec![20.5]),
    ];
    let stats = extractor.extract_run("sample_01", spectra, dir.path())?;

    assert_eq!(stats.spectra_seen, 4);
    assert_eq!(stats.skipped_ms_level, 1);
    assert_eq!(stats.skipped_empty, 1);
    assert_eq!(stats.scans_written, 2);
    assert_eq!(stats.peaks_written, 2);

    let run = dir.path().join("sample_01");
    assert_eq!(
        fs::read_to_string(run.join("1.csv"))?,
        "m/z,intensity\n500.001,10\n"
    );
    assert!(!run.join("2.csv").exists());
    assert!(!run.join("3.csv").exists());

    let index = RawFileIndex::discover(dir.path())?;
    assert_eq!(index.raw_files()[0].name, "sample_01");
    let records = ScanLoader::new().load(&run)?;
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].intensity, 20.5);
    Ok(())
}

#[test]
fn test_dump_mode_keeps_every_peak() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let extractor = ScanExtractor::new(ExtractConfig::dump().with_ms_level(None));

    let spectra = vec![
        Spectrum::new(10, 1, vec![100.0, 200.0], vec![1.0, 2.0]),
        Spectrum::new(11, 2, vec![300.0], vec![3.0]),
        Spectrum::new(12, 1, vec![], vec![]),
    ];
    let stats = extractor.extract_run("run", spectra, dir.path())?;

    assert_eq!(stats.scans_written, 2);
    assert_eq!(stats.peaks_written, 3);
    assert_eq!(stats.skipped_empty, 1);
    Ok(())
}

#[test]
fn test_no_output_directory_when_nothing_written() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let masses = TargetMasses::new([500.0])?;
    let extractor = ScanExtractor::new(ExtractConfig::filtered(masses, ppm(10.0)));

    let stats = extractor.extract_run(
        "quiet",
        vec![Spectrum::new(1, 1, vec![900.0], vec![1.0])],
        dir.path(),
    )?;
    assert_eq!(stats.scans_written, 0);
    assert!(!dir.path().join("quiet").exists());
    Ok(())
}

#[test]
fn test_invalid_data() {
    let dir = tempdir().unwrap();
    let extractor = ScanExtractor::new(ExtractConfig::dump());

    let mismatched = vec![Spectrum::new(1, 1, vec![1.0, 2.0], vec![1.0])];
    assert!(matches!(
        extractor.extract_run("run", mismatched, dir.path()),
        Err(ExtractError::InvalidData(_))
    ));

    for name in ["", "..", "a/b"] {
        assert!(matches!(
            extractor.extract_run(name, Vec::<Spectrum>::new(), dir.path()),
            Err(ExtractError::InvalidData(_))
        ));
    }
}
