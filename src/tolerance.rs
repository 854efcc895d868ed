//! # ppm Tolerance Matching
//!
//! Target masses, ppm tolerances and the matching predicate shared by every
//! report in the crate.
//!
//! An observation matches a target when
//!
//! ```text
//! |observed - target| / target * 1_000_000 <= tolerance
//! ```
//!
//! Equality at exactly `tolerance` ppm is a match.
//!
//! ## Example
//!
//! ```rust
//! use ifishmass::tolerance::{PpmTolerance, PpmWindow, TargetMass};
//!
//! let window = PpmWindow::new(TargetMass::new(500.0)?, PpmTolerance::new(10.0)?);
//! assert!(window.contains(500.004));
//! assert!(!window.contains(500.01));
//! # Ok::<(), ifishmass::tolerance::MatchError>(())
//! ```

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::scan::ScanRecord;

/// Errors raised when matching arguments are out of range
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MatchError {
    /// Tolerance, target mass or mass list violates its contract
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl MatchError {
    fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

/// Relative deviation of `observed` from `target` in parts per million.
///
/// The expression is evaluated in a fixed order so that a tolerance computed
/// with this function is itself an inclusive boundary.
#[inline]
pub fn ppm_error(observed: f64, target: f64) -> f64 {
    (observed - target).abs() / target * 1_000_000.0
}

/// A positive, finite target m/z value.
///
/// Ordered numerically, so it can key ordered maps and sets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct TargetMass(f64);

impl TargetMass {
    /// Validate and wrap a target mass.
    pub fn new(mass: f64) -> Result<Self, MatchError> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(MatchError::invalid(format!(
                "target mass must be a positive finite number, got {}",
                mass
            )));
        }
        Ok(Self(mass))
    }

    /// The m/z value.
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for TargetMass {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TargetMass {}

impl PartialOrd for TargetMass {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TargetMass {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl TryFrom<f64> for TargetMass {
    type Error = MatchError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TargetMass> for f64 {
    fn from(mass: TargetMass) -> Self {
        mass.0
    }
}

impl fmt::Display for TargetMass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A non-negative, finite tolerance in parts per million.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct PpmTolerance(f64);

impl PpmTolerance {
    /// Validate and wrap a ppm tolerance.
    pub fn new(ppm: f64) -> Result<Self, MatchError> {
        if !ppm.is_finite() || ppm < 0.0 {
            return Err(MatchError::invalid(format!(
                "ppm tolerance must be a non-negative finite number, got {}",
                ppm
            )));
        }
        Ok(Self(ppm))
    }

    /// The tolerance in ppm.
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for PpmTolerance {
    type Error = MatchError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PpmTolerance> for f64 {
    fn from(tolerance: PpmTolerance) -> Self {
        tolerance.0
    }
}

impl fmt::Display for PpmTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ppm", self.0)
    }
}

/// The deduplicated target-mass list in ascending numeric order.
///
/// This order is the mass visitation order of every report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetMasses(Vec<TargetMass>);

impl TargetMasses {
    /// Build the list from raw values. Fails on an empty list or any invalid mass.
    pub fn new<I>(masses: I) -> Result<Self, MatchError>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut validated = masses
            .into_iter()
            .map(TargetMass::new)
            .collect::<Result<Vec<_>, _>>()?;

        if validated.is_empty() {
            return Err(MatchError::invalid("target mass list is empty"));
        }

        validated.sort();
        validated.dedup();
        Ok(Self(validated))
    }

    /// Number of distinct masses.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed list; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, TargetMass> {
        self.0.iter()
    }

    /// Borrow as a slice.
    pub fn as_slice(&self) -> &[TargetMass] {
        &self.0
    }

    /// Whether `mass` is one of the targets.
    pub fn contains(&self, mass: TargetMass) -> bool {
        self.0.binary_search(&mass).is_ok()
    }
}

impl<'a> IntoIterator for &'a TargetMasses {
    type Item = &'a TargetMass;
    type IntoIter = std::slice::Iter<'a, TargetMass>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A tolerance window around one target mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PpmWindow {
    /// Center of the window
    pub target: TargetMass,
    /// Half-width of the window in ppm of `target`
    pub tolerance: PpmTolerance,
}

impl PpmWindow {
    /// Create a window from validated values.
    pub fn new(target: TargetMass, tolerance: PpmTolerance) -> Self {
        Self { target, tolerance }
    }

    /// Whether `mz` falls inside the window.
    #[inline]
    pub fn contains(&self, mz: f64) -> bool {
        ppm_error(mz, self.target.value()) <= self.tolerance.value()
    }

    /// Matching records, in input order.
    pub fn filter<'a>(
        self,
        records: &'a [ScanRecord],
    ) -> impl Iterator<Item = &'a ScanRecord> + 'a {
        records.iter().filter(move |record| self.contains(record.mz))
    }
}

/// Return the observations within `tolerance` ppm of `target`, in input order.
///
/// Fails with [`MatchError::InvalidArgument`] if `target <= 0` or `tolerance < 0`.
/// No match is an empty result, not an error.
pub fn match_within(
    target: f64,
    tolerance: f64,
    observations: &[ScanRecord],
) -> Result<Vec<&ScanRecord>, MatchError> {
    let window = PpmWindow::new(TargetMass::new(target)?, PpmTolerance::new(tolerance)?);
    Ok(window.filter(observations).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn record(mz: f64, intensity: f64) -> ScanRecord {
        ScanRecord {
            mz,
            intensity,
            source: Arc::new(PathBuf::from("raw/1.csv")),
        }
    }

    #[test]
    fn test_match_within_keeps_input_order() {
        let records = vec![
            record(500.002, 10.0),
            record(600.0, 99.0),
            record(499.999, 20.0),
            record(500.0, 30.0),
        ];

        let matched = match_within(500.0, 10.0, &records).unwrap();
        let intensities: Vec<f64> = matched.iter().map(|r| r.intensity).collect();
        assert_eq!(intensities, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_filter_borrows_only_the_records() {
        let records = vec![record(500.001, 4.0), record(700.0, 5.0)];
        let matched = {
            let window = PpmWindow::new(
                TargetMass::new(500.0).unwrap(),
                PpmTolerance::new(5.0).unwrap(),
            );
            window.filter(&records).collect::<Vec<_>>()
        };
        assert_eq!(matched.len(), 1);
        assert!(std::ptr::eq(matched[0], &records[0]));
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let target = 441.20236;
        let observed = 441.2068;
        let tolerance = ppm_error(observed, target);

        let records = vec![record(observed, 1.0)];
        assert_eq!(match_within(target, tolerance, &records).unwrap().len(), 1);

        let tighter = tolerance - 1e-9;
        assert!(match_within(target, tighter, &records).unwrap().is_empty());
    }

    #[test]
    fn test_zero_tolerance_matches_exact_mass_only() {
        let records = vec![record(500.0, 1.0), record(500.0000001, 2.0)];
        let matched = match_within(500.0, 0.0, &records).unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].intensity, 1.0);
    }

    #[test]
    fn test_empty_input_is_not_an_error() {
        assert!(match_within(500.0, 10.0, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(matches!(
            match_within(0.0, 10.0, &[]),
            Err(MatchError::InvalidArgument(_))
        ));
        assert!(matches!(
            match_within(-5.0, 10.0, &[]),
            Err(MatchError::InvalidArgument(_))
        ));
        assert!(matches!(
            match_within(500.0, -1.0, &[]),
            Err(MatchError::InvalidArgument(_))
        ));
        assert!(PpmTolerance::new(f64::NAN).is_err());
        assert!(TargetMass::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_target_masses_sorted_and_deduplicated() {
        let masses = TargetMasses::new([600.0, 500.0, 600.0, 441.2]).unwrap();
        let values: Vec<f64> = masses.iter().map(|m| m.value()).collect();
        assert_eq!(values, vec![441.2, 500.0, 600.0]);
        assert!(masses.contains(TargetMass::new(500.0).unwrap()));
        assert!(!masses.contains(TargetMass::new(501.0).unwrap()));
    }

    #[test]
    fn test_target_masses_rejects_empty_and_invalid() {
        assert!(TargetMasses::new(Vec::<f64>::new()).is_err());
        assert!(TargetMasses::new([500.0, 0.0]).is_err());
    }

    #[test]
    fn test_serde_validates() {
        let ok: TargetMass = serde_json::from_str("881.39739").unwrap();
        assert_eq!(ok.value(), 881.39739);
        assert!(serde_json::from_str::<TargetMass>("-1.0").is_err());
        assert!(serde_json::from_str::<PpmTolerance>("-0.5").is_err());
    }
}
