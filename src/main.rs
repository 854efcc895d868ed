//! # iFishMass
//!
//! Command-line front end: search scan files for target masses and write the
//! reports.
//!
//! ## Usage
//!
//! ```bash
//! # Write a commented starter config
//! ifishmass init ifishmass.toml
//!
//! # List the raw files a run would search
//! ifishmass index scans/
//!
//! # Run the search
//! ifishmass -v run --config ifishmass.toml --ppm 5
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
