use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
#[cfg(feature = "colorized_output")]
use console::style;
use serde::Serialize;

use crate::aggregate::LoadFailure;
use crate::tolerance::{PpmTolerance, TargetMass};

/// Row counts of each report mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportCounts {
    /// Rows in the all-matches report
    pub all_matches: usize,
    /// Rows in the per-raw-file maxima report
    pub per_raw_maxima: usize,
    /// Samples in the wide per-raw-file maxima table
    pub wide_samples: usize,
    /// Rows in the global maxima report
    pub global_maxima: usize,
    /// Rows in the group totals report, if written
    pub group_totals: Option<usize>,
}

/// Outcome of one end-to-end run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Root directory that was searched
    pub data_folder: PathBuf,
    /// Directory the reports were written to
    pub output_dir: PathBuf,
    /// Matching tolerance
    pub tolerance: PpmTolerance,
    /// Target masses, ascending
    pub masses: Vec<TargetMass>,
    /// Number of raw files discovered
    pub raw_files: usize,
    /// Row counts per report
    pub counts: ReportCounts,
    /// Group masses that matched in no sample
    pub absent_group_masses: Vec<TargetMass>,
    /// Scan files dropped because they could not be read
    pub failures: Vec<LoadFailure>,
    /// Report files written, in write order
    pub outputs: Vec<PathBuf>,
    /// When the run finished
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    /// True when no scan file was dropped.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Format the summary with colors for console output.
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            let mut output = String::new();

            output.push_str(&format!("{}\n", style("iFishMass Run Summary").bold().cyan()));
            output.push_str(&format!("{}\n", style("=====================").cyan()));
            output.push_str(&format!(
                "{}: {}\n",
                style("Data folder").bold(),
                self.data_folder.display()
            ));
            output.push_str(&format!("{}: {}\n", style("Tolerance").bold(), self.tolerance));
            output.push_str(&format!(
                "{}: {} masses across {} raw files\n\n",
                style("Search").bold(),
                self.masses.len(),
                self.raw_files
            ));

            self.push_counts(&mut output);

            if !self.absent_group_masses.is_empty() {
                output.push_str(&format!(
                    "{}: {}\n",
                    style("Unmatched group masses").yellow().bold(),
                    join(&self.absent_group_masses)
                ));
            }

            if self.failures.is_empty() {
                output.push_str(&format!("{}\n", style("All scan files read").green()));
            } else {
                output.push_str(&format!(
                    "{}: {}\n",
                    style("Dropped scan files").red().bold(),
                    style(self.failures.len()).red()
                ));
                for failure in &self.failures {
                    output.push_str(&format!("  {}\n", failure));
                }
            }

            output.push_str(&format!(
                "\n{}: {}\n",
                style("Reports written to").bold(),
                style(self.output_dir.display()).green()
            ));
            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }

    fn push_counts(&self, output: &mut String) {
        output.push_str(&format!("  All matches:          {}\n", self.counts.all_matches));
        output.push_str(&format!("  Per-raw maxima:       {}\n", self.counts.per_raw_maxima));
        output.push_str(&format!("  Wide table samples:   {}\n", self.counts.wide_samples));
        output.push_str(&format!("  Global maxima:        {}\n", self.counts.global_maxima));
        if let Some(groups) = self.counts.group_totals {
            output.push_str(&format!("  Group totals:         {}\n", groups));
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "iFishMass Run Summary")?;
        writeln!(f, "=====================")?;
        writeln!(f, "Data folder: {}", self.data_folder.display())?;
        writeln!(f, "Tolerance: {}", self.tolerance)?;
        writeln!(
            f,
            "Search: {} masses across {} raw files",
            self.masses.len(),
            self.raw_files
        )?;
        writeln!(f)?;

        let mut counts = String::new();
        self.push_counts(&mut counts);
        f.write_str(&counts)?;

        if !self.absent_group_masses.is_empty() {
            writeln!(f, "Unmatched group masses: {}", join(&self.absent_group_masses))?;
        }
        if self.failures.is_empty() {
            writeln!(f, "All scan files read")?;
        } else {
            writeln!(f, "Dropped scan files: {}", self.failures.len())?;
            for failure in &self.failures {
                writeln!(f, "  {}", failure)?;
            }
        }
        writeln!(f)?;
        write!(f, "Reports written to: {}", self.output_dir.display())
    }
}

fn join(masses: &[TargetMass]) -> String {
    masses
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
