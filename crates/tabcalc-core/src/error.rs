//! Error types for Tabcalc core.

use thiserror::Error;

/// Errors that can occur while loading, configuring or writing a sheet.
#[derive(Error, Debug)]
pub enum TabcalcError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TabcalcError>;
