//! TOML configuration file support.
//!
//! ```toml
//! # ifishmass.toml
//! [input]
//! data_folder = "scans"
//! scan_extension = "csv"
//!
//! [output]
//! directory = "reports"
//!
//! [search]
//! ppm = 10.0
//! masses = [881.39739, 587.93404]
//!
//! [groups]
//! internal_standard = [1296.68481]
//! modified_peptides = [881.39739]
//! unmodified_peptides = [1189.48879]
//!
//! [run]
//! threads = 4
//! ```

use anyhow::{bail, Context, Result};
use ifishmass::pipeline::PipelineConfig;
use ifishmass::scan::ScanConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::Overrides;

/// Tolerance used when neither the config nor the command line sets one.
pub const DEFAULT_PPM: f64 = 10.0;

/// Output directory used when neither the config nor the command line sets one.
pub const DEFAULT_OUTPUT_DIR: &str = "reports";

/// Root configuration structure for ifishmass.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Where the scan files are.
    #[serde(default)]
    pub input: InputConfig,

    /// Where the reports go.
    #[serde(default)]
    pub output: OutputConfig,

    /// What to search for.
    #[serde(default)]
    pub search: SearchConfig,

    /// Mass groups summed per sample.
    #[serde(default)]
    pub groups: GroupsConfig,

    /// Execution settings.
    #[serde(default)]
    pub run: RunConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct InputConfig {
    /// Root directory holding one sub-directory per raw file.
    pub data_folder: Option<PathBuf>,

    /// Scan-file extension, without the dot.
    pub scan_extension: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchConfig {
    /// Matching tolerance in ppm.
    pub ppm: Option<f64>,

    /// Target masses.
    #[serde(default)]
    pub masses: Vec<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GroupsConfig {
    #[serde(default)]
    pub internal_standard: Vec<f64>,
    #[serde(default)]
    pub modified_peptides: Vec<f64>,
    #[serde(default)]
    pub unmodified_peptides: Vec<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RunConfig {
    /// Worker threads.
    pub threads: Option<usize>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Merge with command-line overrides into a run configuration.
    pub fn into_pipeline(self, overrides: Overrides) -> Result<PipelineConfig> {
        let Some(data_folder) = overrides.data_folder.or(self.input.data_folder) else {
            bail!("No data folder: set [input] data_folder or pass --data-folder");
        };

        let masses = if overrides.masses.is_empty() {
            self.search.masses
        } else {
            overrides.masses
        };
        if masses.is_empty() {
            bail!("No target masses: set [search] masses or pass --mass");
        }

        let output = overrides
            .output
            .or(self.output.directory)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        let ppm = overrides.ppm.or(self.search.ppm).unwrap_or(DEFAULT_PPM);

        let mut scan = ScanConfig::default();
        if let Some(extension) = &self.input.scan_extension {
            scan = scan.with_extension(extension);
        }

        let mut config = PipelineConfig::new(data_folder, output, ppm, masses).with_groups(
            self.groups.internal_standard,
            self.groups.modified_peptides,
            self.groups.unmodified_peptides,
        );
        config.scan = scan;
        config.threads = overrides.threads.or(self.run.threads);
        Ok(config)
    }
}
