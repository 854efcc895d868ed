//! Property-based tests for the ppm matching predicate and the reductions
//! built on it.

use ifishmass::aggregate::max_intensity;
use ifishmass::report::{to_wide, PivotEntry};
use ifishmass::scan::ScanRecord;
use ifishmass::tolerance::{match_within, ppm_error, TargetMass, TargetMasses};
use proptest::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;

fn records(values: &[(f64, f64)]) -> Vec<ScanRecord> {
    let source = Arc::new(PathBuf::from("prop.csv"));
    values
        .iter()
        .map(|&(mz, intensity)| ScanRecord {
            mz,
            intensity,
            source: Arc::clone(&source),
        })
        .collect()
}

fn observations() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((490.0f64..510.0, 0.0f64..1e6), 0..200)
}

proptest! {
    /// A record is returned iff its ppm error is within tolerance
    #[test]
    fn test_inclusion_iff_predicate(
        target in 495.0f64..505.0,
        tolerance in 0.0f64..50.0,
        values in observations(),
    ) {
        let obs = records(&values);
        let matched = match_within(target, tolerance, &obs).unwrap();

        let expected: Vec<&ScanRecord> = obs
            .iter()
            .filter(|r| ppm_error(r.mz, target) <= tolerance)
            .collect();
        prop_assert_eq!(matched, expected);
    }

    /// Matches keep the relative order of the input
    #[test]
    fn test_order_preserved(
        target in 495.0f64..505.0,
        tolerance in 0.0f64..50.0,
        values in observations(),
    ) {
        let obs = records(&values);
        let matched = match_within(target, tolerance, &obs).unwrap();

        let positions: Vec<usize> = matched
            .iter()
            .map(|m| obs.iter().position(|r| std::ptr::eq(r, *m)).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    /// Widening the tolerance never drops a match
    #[test]
    fn test_monotone_in_tolerance(
        target in 495.0f64..505.0,
        narrow in 0.0f64..25.0,
        extra in 0.0f64..25.0,
        values in observations(),
    ) {
        let obs = records(&values);
        let small = match_within(target, narrow, &obs).unwrap();
        let large = match_within(target, narrow + extra, &obs).unwrap();

        prop_assert!(small.len() <= large.len());
        for m in &small {
            prop_assert!(large.iter().any(|l| std::ptr::eq(*l, *m)));
        }
    }

    /// The maximum is the first record carrying the highest intensity
    #[test]
    fn test_max_intensity_earliest_wins(values in observations()) {
        let obs = records(&values);
        match max_intensity(&obs) {
            None => prop_assert!(obs.is_empty()),
            Some(best) => {
                let highest = obs.iter().map(|r| r.intensity).fold(f64::MIN, f64::max);
                prop_assert_eq!(best.intensity, highest);
                let first = obs.iter().find(|r| r.intensity == highest).unwrap();
                prop_assert!(std::ptr::eq(best, first));
            }
        }
    }

    /// Mass lists come out sorted and unique whatever the input order
    #[test]
    fn test_target_masses_sorted_unique(
        masses in prop::collection::vec(1.0f64..2000.0, 1..30),
    ) {
        let list = TargetMasses::new(masses.iter().copied()).unwrap();
        let values: Vec<f64> = list.iter().map(|m| m.value()).collect();
        prop_assert!(values.windows(2).all(|w| w[0] < w[1]));
        for m in &masses {
            prop_assert!(list.contains(TargetMass::new(*m).unwrap()));
        }
    }

    /// Every long entry lands in its cell; every other cell is zero
    #[test]
    fn test_wide_cells_match_long_rows(
        cells in prop::collection::btree_map(
            (0usize..5, 0usize..5),
            0.0f64..1e6,
            0..20,
        ),
    ) {
        let entries: Vec<PivotEntry> = cells
            .iter()
            .map(|(&(s, m), &v)| {
                PivotEntry::new(format!("s{}", s), TargetMass::new(100.0 + m as f64).unwrap(), v)
            })
            .collect();
        let table = to_wide(entries).unwrap();

        for sample in table.samples() {
            for &mass in table.masses() {
                let s: usize = sample[1..].parse().unwrap();
                let m = (mass.value() - 100.0) as usize;
                let expected = cells.get(&(s, m)).copied().unwrap_or(0.0);
                prop_assert_eq!(table.get(sample, mass), Some(expected));
            }
        }
    }
}
