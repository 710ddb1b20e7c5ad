//! tabcalc-core - Grid loading, rendering and configuration.

pub mod config;
pub mod document;
pub mod error;
pub mod storage;

pub use config::{LoadConfig, MissingCell};
pub use document::Document;
pub use error::{Result, TabcalcError};

pub use tabcalc_engine::engine::{Address, Cell, CellError, Sheet};
