use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

use crate::aggregate::AggregateRow;
use crate::tolerance::TargetMass;

use super::columns::{mass_column, SAMPLE};
use super::{format_value, ReportError};

/// One long-format cell: the intensity of a mass in a sample
#[derive(Debug, Clone, PartialEq)]
pub struct PivotEntry {
    /// Sample identifier (raw-file name)
    pub sample: String,
    /// Column key
    pub target_mass: TargetMass,
    /// Cell value
    pub intensity: f64,
}

impl PivotEntry {
    /// Build an entry from its parts.
    pub fn new(sample: impl Into<String>, target_mass: TargetMass, intensity: f64) -> Self {
        Self {
            sample: sample.into(),
            target_mass,
            intensity,
        }
    }
}

impl From<&AggregateRow> for PivotEntry {
    fn from(row: &AggregateRow) -> Self {
        Self::new(row.raw_file.clone(), row.target_mass, row.max_intensity)
    }
}

/// Whether a mass column exists in a [`WideTable`]
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnPresence {
    /// The column exists; one value per sample, in sample order
    Present(Vec<f64>),
    /// No long row carried this mass
    Absent,
}

/// Wide-format table: one row per sample, one column per mass
///
/// Samples are sorted by name and columns by ascending mass. Cells with no
/// long-format row hold `0`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WideTable {
    samples: Vec<String>,
    masses: Vec<TargetMass>,
    values: Vec<Vec<f64>>,
}

/// Pivot long rows into a [`WideTable`].
///
/// This is a strict pivot: a second row for the same (sample, mass) pair
/// fails with [`ReportError::DuplicateKey`]. Reduce with the per-raw or
/// global maxima first.
pub fn to_wide<I>(entries: I) -> Result<WideTable, ReportError>
where
    I: IntoIterator<Item = PivotEntry>,
{
    let mut cells: BTreeMap<String, BTreeMap<TargetMass, f64>> = BTreeMap::new();
    let mut masses = BTreeSet::new();

    for entry in entries {
        masses.insert(entry.target_mass);
        let row = cells.entry(entry.sample.clone()).or_default();
        if row.insert(entry.target_mass, entry.intensity).is_some() {
            return Err(ReportError::DuplicateKey {
                sample: entry.sample,
                mass: entry.target_mass.value(),
            });
        }
    }

    let masses: Vec<TargetMass> = masses.into_iter().collect();
    let mut samples = Vec::with_capacity(cells.len());
    let mut values = Vec::with_capacity(cells.len());

    for (sample, row) in cells {
        values.push(
            masses
                .iter()
                .map(|mass| row.get(mass).copied().unwrap_or(0.0))
                .collect(),
        );
        samples.push(sample);
    }

    Ok(WideTable {
        samples,
        masses,
        values,
    })
}

impl WideTable {
    /// Sample identifiers, in row order.
    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    /// Masses, in column order.
    pub fn masses(&self) -> &[TargetMass] {
        &self.masses
    }

    /// Column labels, e.g. `500-M/Z`, in column order.
    pub fn column_labels(&self) -> Vec<String> {
        self.masses.iter().map(|m| mass_column(m.value())).collect()
    }

    /// Rows as (sample, values) pairs.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.samples
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(Vec::as_slice))
    }

    /// Cell value, `None` if the sample or the mass column does not exist.
    pub fn get(&self, sample: &str, mass: TargetMass) -> Option<f64> {
        let row = self.samples.binary_search_by(|s| s.as_str().cmp(sample)).ok()?;
        let col = self.masses.binary_search(&mass).ok()?;
        Some(self.values[row][col])
    }

    /// The column of `mass`, or [`ColumnPresence::Absent`].
    pub fn column(&self, mass: TargetMass) -> ColumnPresence {
        match self.masses.binary_search(&mass) {
            Ok(col) => ColumnPresence::Present(self.values.iter().map(|row| row[col]).collect()),
            Err(_) => ColumnPresence::Absent,
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Write as CSV with a `SAMPLE,<mass>-M/Z,...` header.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), ReportError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = vec![SAMPLE.to_string()];
        header.extend(self.column_labels());
        csv_writer.write_record(&header)?;

        for (sample, values) in self.rows() {
            let mut record = Vec::with_capacity(values.len() + 1);
            record.push(sample.to_string());
            record.extend(values.iter().map(|v| format_value(*v)));
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}
