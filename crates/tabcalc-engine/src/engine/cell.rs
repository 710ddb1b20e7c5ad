//! Cell states and raw-text classification.
//!
//! A cell starts life as [`Cell::Undefined`] holding its raw text and is
//! moved through the type-resolution state machine:
//!
//! - `Undefined` -> `Empty` | `String` | `Number` | `Formula` | `Error`
//! - `Formula` -> `Number` | `Error`
//!
//! [`classify`] performs the first step and is pure; the second step needs
//! the rest of the sheet and lives in [`super::formula`].

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use super::error::CellError;

/// Marker that starts a string literal.
pub const STRING_MARKER: char = '\'';
/// Marker that starts a formula.
pub const FORMULA_MARKER: char = '=';

/// A grid slot in its current resolution state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    /// Raw text that has not been classified yet.
    Undefined(String),
    Empty,
    /// Text with the leading quote removed.
    String(String),
    Number { value: i64, display: String },
    /// Expression text without the leading `=`. Never observable after
    /// the sheet has been resolved.
    Formula(String),
    Error(CellError),
}

impl Cell {
    pub fn number(value: i64) -> Cell {
        Cell::Number {
            value,
            display: value.to_string(),
        }
    }

    /// True for the states that are never mutated again.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Cell::Undefined(_) | Cell::Formula(_))
    }

    /// The text to render for this cell.
    ///
    /// Non-terminal cells show their raw text; this only happens when the
    /// sheet is rendered before being resolved.
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            Cell::Undefined(raw) => Cow::Borrowed(raw),
            Cell::Empty => Cow::Borrowed(""),
            Cell::String(s) => Cow::Borrowed(s),
            Cell::Number { display, .. } => Cow::Borrowed(display),
            Cell::Formula(expr) => Cow::Owned(format!("{}{}", FORMULA_MARKER, expr)),
            Cell::Error(err) => Cow::Borrowed(err.code()),
        }
    }
}

/// Classify raw cell text.
///
/// Guards are tried in fixed priority order (empty, string, number,
/// formula) and the first match wins. Anything else is `#NOPATTERN`.
pub fn classify(text: &str) -> Cell {
    if text.is_empty() {
        classify_empty(text)
    } else if text.starts_with(STRING_MARKER) {
        classify_string(text)
    } else if is_integer_literal(text) {
        classify_number(text)
    } else if text.starts_with(FORMULA_MARKER) {
        classify_formula(text)
    } else {
        Cell::Error(CellError::NoPattern)
    }
}

/// Matches `[+-]?[0-9]+`.
pub fn is_integer_literal(text: &str) -> bool {
    let digits = text
        .strip_prefix('+')
        .or_else(|| text.strip_prefix('-'))
        .unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Parse an integer literal, or None if it is not one or does not fit.
pub fn parse_integer_literal(text: &str) -> Option<i64> {
    if !is_integer_literal(text) {
        return None;
    }
    text.parse::<i64>().ok()
}

// Each stage re-checks its own guard so a misrouted call yields an error
// cell rather than a panic.

fn classify_empty(text: &str) -> Cell {
    if !text.is_empty() {
        return Cell::Error(CellError::NotEmpty);
    }
    Cell::Empty
}

fn classify_string(text: &str) -> Cell {
    match text.strip_prefix(STRING_MARKER) {
        Some(rest) => Cell::String(rest.to_string()),
        None => Cell::Error(CellError::Internal),
    }
}

fn classify_number(text: &str) -> Cell {
    match parse_integer_literal(text) {
        Some(value) => Cell::Number {
            value,
            display: text.to_string(),
        },
        None => Cell::Error(CellError::NotANumber),
    }
}

fn classify_formula(text: &str) -> Cell {
    match text.strip_prefix(FORMULA_MARKER) {
        Some(expr) => Cell::Formula(expr.to_string()),
        None => Cell::Error(CellError::NotEquation),
    }
}
