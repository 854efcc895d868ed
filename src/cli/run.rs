use anyhow::{Context, Result};
use ifishmass::pipeline::Pipeline;
use log::{info, warn};
use std::path::PathBuf;

use super::config::Config;
use super::{Overrides, SummaryFormat};

/// Run the search and print the summary
pub fn run(config: Option<PathBuf>, overrides: Overrides, format: SummaryFormat) -> Result<()> {
    let file_config = match &config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let pipeline = file_config.into_pipeline(overrides)?;

    info!("iFishMass");
    info!("=========");
    info!("Data folder: {}", pipeline.data_folder.display());
    info!("Output:      {}", pipeline.output_dir.display());
    info!("Tolerance:   {} ppm", pipeline.tolerance);
    info!("Masses:      {}", pipeline.masses.len());

    let summary = Pipeline::run(&pipeline).context("Run failed")?;

    if !summary.is_complete() {
        warn!(
            "{} scan files could not be read and were skipped",
            summary.failures.len()
        );
    }

    match format {
        SummaryFormat::Json => println!("{}", summary.to_json()?),
        SummaryFormat::Text => println!("{}", summary.format_colored()),
    }
    Ok(())
}
