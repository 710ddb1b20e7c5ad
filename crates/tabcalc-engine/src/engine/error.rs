//! Cell error codes.
//!
//! Every failure during classification or formula evaluation ends up as one
//! of these codes stored in a terminal [`Cell::Error`](super::Cell::Error).
//! The `Display` output is the code itself and is what gets rendered.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error code carried by a cell in the terminal error state.
#[derive(Error, Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum CellError {
    /// Empty-stage classifier saw non-empty text.
    #[error("#NOTEMPTY")]
    NotEmpty,
    /// String-stage classifier saw text without a leading quote.
    #[error("#INTERNAL")]
    Internal,
    /// Number-stage classifier saw text that is not an integer literal.
    #[error("#NOTANUMBER")]
    NotANumber,
    /// Formula-stage classifier saw text without a leading `=`.
    #[error("#NOTEQUATION")]
    NotEquation,
    /// Raw text matched none of the recognized patterns.
    #[error("#NOPATTERN")]
    NoPattern,
    /// The formula revisits a cell that is still being resolved.
    #[error("#RECURSIVELINKS")]
    RecursiveLinks,
    /// An operand is neither a literal nor an address inside the grid.
    #[error("#INVALIDREFERENCE")]
    InvalidReference,
    /// A referenced cell does not hold a number.
    #[error("#INVALIDTYPE")]
    InvalidType,
    /// An operator outside `+ - * /`.
    #[error("#INVALIDOP")]
    InvalidOp,
    /// A referenced cell stayed unresolved after being forced.
    #[error("#BADLINK")]
    BadLink,
    /// Placeholder for data missing from the input.
    #[error("#NODATA")]
    NoData,
    /// Division by zero.
    #[error("#DIVBYZERO")]
    DivByZero,
    /// Arithmetic or literal outside the 64-bit integer range.
    #[error("#OVERFLOW")]
    Overflow,
}

impl CellError {
    /// The display code, e.g. `#NOPATTERN`.
    pub fn code(self) -> &'static str {
        match self {
            CellError::NotEmpty => "#NOTEMPTY",
            CellError::Internal => "#INTERNAL",
            CellError::NotANumber => "#NOTANUMBER",
            CellError::NotEquation => "#NOTEQUATION",
            CellError::NoPattern => "#NOPATTERN",
            CellError::RecursiveLinks => "#RECURSIVELINKS",
            CellError::InvalidReference => "#INVALIDREFERENCE",
            CellError::InvalidType => "#INVALIDTYPE",
            CellError::InvalidOp => "#INVALIDOP",
            CellError::BadLink => "#BADLINK",
            CellError::NoData => "#NODATA",
            CellError::DivByZero => "#DIVBYZERO",
            CellError::Overflow => "#OVERFLOW",
        }
    }

    /// Whether this code came out of evaluating a formula (as opposed to
    /// classifying a literal or filling in missing input).
    ///
    /// Formulas that reference a cell failing this way inherit the code
    /// unchanged; any other error cell is just a non-numeric operand.
    pub fn is_evaluation_failure(self) -> bool {
        matches!(
            self,
            CellError::RecursiveLinks
                | CellError::InvalidReference
                | CellError::InvalidType
                | CellError::InvalidOp
                | CellError::BadLink
                | CellError::DivByZero
                | CellError::Overflow
        )
    }
}
