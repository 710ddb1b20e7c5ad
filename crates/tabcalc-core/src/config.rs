//! Load configuration.
//!
//! Settings come from, in increasing precedence: built-in defaults, the
//! user's `config.toml` in the platform config directory, an explicit
//! config file, and finally command-line flags (applied by the caller).
//!
//! ```toml
//! header = true
//! missing = "nodata"
//! ```

use crate::error::{Result, TabcalcError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tabcalc_engine::engine::{Cell, CellError};

/// What the loader puts in grid slots the input does not provide.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingCell {
    #[default]
    Empty,
    /// An explicit `#NODATA` error.
    NoData,
}

impl MissingCell {
    pub fn placeholder(self) -> Cell {
        match self {
            MissingCell::Empty => Cell::Empty,
            MissingCell::NoData => Cell::Error(CellError::NoData),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadConfig {
    /// First line holds the `rows cols` dimensions. When false the
    /// dimensions are inferred from the data.
    pub header: bool,
    pub missing: MissingCell,
}

impl Default for LoadConfig {
    fn default() -> Self {
        LoadConfig {
            header: true,
            missing: MissingCell::default(),
        }
    }
}

impl LoadConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| TabcalcError::Config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| match e {
            TabcalcError::Config(msg) => {
                TabcalcError::Config(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Load from `explicit` if given, else from the user config file if it
    /// exists, else the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match user_config_path() {
            Some(path) if path.is_file() => {
                tracing::debug!(path = %path.display(), "loading user config");
                Self::from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}

/// `config.toml` in the platform config directory for tabcalc.
pub fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "tabcalc")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}
