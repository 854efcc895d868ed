use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod config;
mod index;
mod init;
mod run;

/// iFishMass - targeted m/z search across raw files
#[derive(Parser)]
#[command(name = "ifishmass")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// How the run summary is printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SummaryFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub data_folder: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub ppm: Option<f64>,
    pub threads: Option<usize>,
    pub masses: Vec<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the data folder and write every report
    Run {
        /// Load settings from a TOML config file
        #[arg(short = 'c', long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Root directory holding one sub-directory per raw file
        #[arg(long, value_name = "DIR")]
        data_folder: Option<PathBuf>,

        /// Directory the reports are written to
        #[arg(short = 'o', long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Matching tolerance in ppm
        #[arg(long)]
        ppm: Option<f64>,

        /// Worker threads (defaults to one per core)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Target mass; repeat to search several (replaces the config list)
        #[arg(short = 'm', long = "mass", value_name = "MZ")]
        masses: Vec<f64>,

        /// Summary output format
        #[arg(long, default_value = "text", value_enum)]
        format: SummaryFormat,
    },

    /// List the raw files found under a data folder
    Index {
        /// Data folder
        #[arg(value_name = "ROOT")]
        root: PathBuf,

        /// Scan-file extension
        #[arg(short = 'e', long, default_value = "csv")]
        extension: String,
    },

    /// Write a commented starter config file
    Init {
        /// Config file path
        #[arg(value_name = "PATH", default_value = "ifishmass.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run {
            config,
            data_folder,
            output,
            ppm,
            threads,
            masses,
            format,
        } => run::run(
            config,
            Overrides {
                data_folder,
                output,
                ppm,
                threads,
                masses,
            },
            format,
        ),
        Commands::Index { root, extension } => index::run(root, &extension),
        Commands::Init { path, force } => init::run(path, force),
    }
}
