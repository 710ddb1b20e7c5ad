//! Spreadsheet engine API.
//!
//! This module provides the evaluation core for a grid of raw cell texts:
//!
//! - [`Address`] - Cell address parsing (A1 notation ↔ column/row indices)
//! - [`Cell`], [`classify`] - Cell states and raw-text classification
//! - [`tokenize`], [`evaluate`] - Left-to-right integer formulas
//! - [`Sheet`] - Cell storage and the whole-grid resolution pass
//! - [`CellError`] - Error codes rendered in place of a value

mod address;
mod cell;
mod error;
mod formula;
mod sheet;

pub use address::{Address, ParseAddressError};
pub use cell::{Cell, FORMULA_MARKER, STRING_MARKER, classify, is_integer_literal};
pub use error::CellError;
pub use formula::{Expression, Operator, Visited, evaluate, resolve_formula, tokenize};
pub use sheet::{ResolveSummary, Sheet};
