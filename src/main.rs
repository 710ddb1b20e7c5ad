//! Tabcalc - evaluate a tab-delimited grid of integer formulas.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Read};
use tabcalc_core::Document;
use tracing_subscriber::EnvFilter;

use cli::Cli;

fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    let config = cli.load_config().context("Failed to load configuration")?;

    let mut doc = match cli.input_path() {
        Some(path) => Document::from_file(path, &config)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read stdin")?;
            Document::from_content(&content, &config).context("Failed to parse stdin")?
        }
    };

    let summary = doc.resolve();
    tracing::info!(
        rows = doc.sheet.rows(),
        cols = doc.sheet.cols(),
        numbers = summary.numbers,
        errors = summary.errors,
        "grid evaluated"
    );

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            doc.write_to(&mut BufWriter::new(file))?;
        }
        None => {
            let stdout = io::stdout();
            doc.write_to(&mut stdout.lock())?;
        }
    }

    Ok(())
}
