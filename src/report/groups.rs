use std::io::Write;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::tolerance::{MatchError, TargetMass};

use super::columns::{INTERNAL_STANDARD, MODIFIED_PEPTIDE, SAMPLE, UNMODIFIED_PEPTIDE};
use super::wide::{ColumnPresence, WideTable};
use super::{format_value, ReportError};

/// Named sets of masses summed per sample after the wide reshape
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MassGroups {
    /// Internal standard masses
    #[serde(default)]
    pub internal_standard: Vec<TargetMass>,
    /// Modified peptide masses
    #[serde(default)]
    pub modified_peptides: Vec<TargetMass>,
    /// Unmodified peptide masses
    #[serde(default)]
    pub unmodified_peptides: Vec<TargetMass>,
}

impl MassGroups {
    /// Validate raw mass lists into groups; each group is sorted and a
    /// repeated mass is kept once.
    pub fn new(
        internal_standard: &[f64],
        modified_peptides: &[f64],
        unmodified_peptides: &[f64],
    ) -> Result<Self, MatchError> {
        let validate = |masses: &[f64]| -> Result<Vec<TargetMass>, MatchError> {
            let mut group = masses
                .iter()
                .map(|&m| TargetMass::new(m))
                .collect::<Result<Vec<_>, _>>()?;
            group.sort();
            group.dedup();
            Ok(group)
        };
        Ok(Self {
            internal_standard: validate(internal_standard)?,
            modified_peptides: validate(modified_peptides)?,
            unmodified_peptides: validate(unmodified_peptides)?,
        })
    }

    /// True when all three groups have at least one mass.
    pub fn is_complete(&self) -> bool {
        !self.internal_standard.is_empty()
            && !self.modified_peptides.is_empty()
            && !self.unmodified_peptides.is_empty()
    }
}

/// Group totals of one sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupTotalsRow {
    /// Sample identifier
    pub sample: String,
    /// Sum over the internal standard masses
    pub internal_standard: f64,
    /// Sum over the modified peptide masses
    pub modified_peptide: f64,
    /// Sum over the unmodified peptide masses
    pub unmodified_peptide: f64,
}

/// Per-sample group totals
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupTotals {
    /// One row per wide-table sample, in the same order
    pub rows: Vec<GroupTotalsRow>,
    /// Group masses with no column in the wide table, ascending
    pub absent: Vec<TargetMass>,
}

impl GroupTotals {
    /// Write as CSV under the `SAMPLE,INTERNAL_STANDARD,...` header.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), ReportError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record([SAMPLE, INTERNAL_STANDARD, MODIFIED_PEPTIDE, UNMODIFIED_PEPTIDE])?;
        for row in &self.rows {
            csv_writer.write_record([
                row.sample.clone(),
                format_value(row.internal_standard),
                format_value(row.modified_peptide),
                format_value(row.unmodified_peptide),
            ])?;
        }
        csv_writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}

/// Sum each group's wide-table columns per sample.
///
/// A group mass without a column contributes nothing and is listed in
/// [`GroupTotals::absent`]. A mass repeated within a group is counted once.
pub fn group_totals(table: &WideTable, groups: &MassGroups) -> GroupTotals {
    let mut absent = Vec::new();
    let mut sum_group = |masses: &[TargetMass]| -> Vec<f64> {
        let mut unique = masses.to_vec();
        unique.sort();
        unique.dedup();

        let mut totals = vec![0.0; table.len()];
        for mass in unique {
            match table.column(mass) {
                ColumnPresence::Present(values) => {
                    for (total, value) in totals.iter_mut().zip(values) {
                        *total += value;
                    }
                }
                ColumnPresence::Absent => {
                    debug!("Group mass {} has no column", mass);
                    absent.push(mass);
                }
            }
        }
        totals
    };

    let internal = sum_group(&groups.internal_standard);
    let modified = sum_group(&groups.modified_peptides);
    let unmodified = sum_group(&groups.unmodified_peptides);

    absent.sort();
    absent.dedup();

    let rows = table
        .samples()
        .iter()
        .enumerate()
        .map(|(i, sample)| GroupTotalsRow {
            sample: sample.clone(),
            internal_standard: internal[i],
            modified_peptide: modified[i],
            unmodified_peptide: unmodified[i],
        })
        .collect();

    GroupTotals { rows, absent }
}
