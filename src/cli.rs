//! Command-line arguments.

use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tabcalc_core::{LoadConfig, MissingCell};

#[derive(Parser, Debug)]
#[command(name = "tabcalc")]
#[command(
    version,
    about = "Evaluate a tab-delimited grid of literals and integer formulas"
)]
pub struct Cli {
    /// Grid file to read ('-' or omitted for stdin)
    pub input: Option<PathBuf>,

    /// Write the rendered grid here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file (default: config.toml in the user config dir, if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Placeholder for cells missing from the input
    #[arg(long, value_enum)]
    pub missing: Option<MissingArg>,

    /// Input has no 'rows cols' header; infer the grid size from the data
    #[arg(long)]
    pub no_header: bool,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MissingArg {
    Empty,
    Nodata,
}

impl From<MissingArg> for MissingCell {
    fn from(arg: MissingArg) -> Self {
        match arg {
            MissingArg::Empty => MissingCell::Empty,
            MissingArg::Nodata => MissingCell::NoData,
        }
    }
}

impl Cli {
    /// Input path, or None for stdin.
    pub fn input_path(&self) -> Option<&Path> {
        self.input.as_deref().filter(|p| *p != Path::new("-"))
    }

    /// Config file settings with command-line flags applied on top.
    pub fn load_config(&self) -> tabcalc_core::Result<LoadConfig> {
        let mut config = LoadConfig::load(self.config.as_deref())?;
        if let Some(missing) = self.missing {
            config.missing = missing.into();
        }
        if self.no_header {
            config.header = false;
        }
        Ok(config)
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
