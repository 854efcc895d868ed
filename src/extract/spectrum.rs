use crate::tolerance::{PpmTolerance, PpmWindow, TargetMasses};

use super::ExtractError;

/// A decoded spectrum: parallel m/z and intensity arrays
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Spectrum {
    /// Scan number within the run, used as the scan file name
    pub scan_number: u32,
    /// MS level (1 for MS1, 2 for MS/MS)
    pub ms_level: u8,
    /// Peak m/z values
    pub mz: Vec<f64>,
    /// Peak intensities, same length as `mz`
    pub intensity: Vec<f64>,
}

impl Spectrum {
    /// Create a spectrum from its arrays.
    pub fn new(scan_number: u32, ms_level: u8, mz: Vec<f64>, intensity: Vec<f64>) -> Self {
        Self {
            scan_number,
            ms_level,
            mz,
            intensity,
        }
    }

    /// Fails with [`ExtractError::InvalidData`] when the arrays differ in length.
    pub fn validate(&self) -> Result<(), ExtractError> {
        if self.mz.len() != self.intensity.len() {
            return Err(ExtractError::InvalidData(format!(
                "scan {}: {} m/z values but {} intensities",
                self.scan_number,
                self.mz.len(),
                self.intensity.len()
            )));
        }
        Ok(())
    }

    /// Number of peaks.
    pub fn len(&self) -> usize {
        self.mz.len()
    }

    /// True when the spectrum has no peaks.
    pub fn is_empty(&self) -> bool {
        self.mz.is_empty()
    }

    /// (m/z, intensity) pairs in array order.
    pub fn peaks(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.mz.iter().copied().zip(self.intensity.iter().copied())
    }
}

/// Keep the peaks within `tolerance` of any of `masses`, in array order.
///
/// The returned spectrum keeps the scan number and MS level of the input.
pub fn filter_peaks(
    spectrum: &Spectrum,
    masses: &TargetMasses,
    tolerance: PpmTolerance,
) -> Spectrum {
    let windows: Vec<PpmWindow> = masses
        .iter()
        .map(|&mass| PpmWindow::new(mass, tolerance))
        .collect();

    let (mz, intensity) = spectrum
        .peaks()
        .filter(|&(mz, _)| windows.iter().any(|w| w.contains(mz)))
        .unzip();

    Spectrum {
        scan_number: spectrum.scan_number,
        ms_level: spectrum.ms_level,
        mz,
        intensity,
    }
}
