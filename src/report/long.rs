use std::io::Write;

use crate::aggregate::{AggregateRow, MatchResult};

use super::columns::LONG_HEADER;
use super::{format_value, ReportError};

/// A row that can be written to a long-format report
pub trait LongRow {
    /// Fields in [`LONG_HEADER`] order.
    fn long_fields(&self) -> [String; 5];
}

impl LongRow for MatchResult {
    fn long_fields(&self) -> [String; 5] {
        [
            format_value(self.target_mass.value()),
            format_value(self.observed_mz),
            format_value(self.intensity),
            self.raw_file.clone(),
            self.source_name(),
        ]
    }
}

impl LongRow for AggregateRow {
    fn long_fields(&self) -> [String; 5] {
        [
            format_value(self.target_mass.value()),
            format_value(self.observed_mz),
            format_value(self.max_intensity),
            self.raw_file.clone(),
            self.source_name(),
        ]
    }
}

/// Write `rows` as CSV under the long-format header.
pub fn write_long<W, R>(writer: W, rows: &[R]) -> Result<(), ReportError>
where
    W: Write,
    R: LongRow,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(LONG_HEADER)?;
    for row in rows {
        csv_writer.write_record(row.long_fields())?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
