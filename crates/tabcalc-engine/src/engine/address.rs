//! Cell address parsing and formatting.
//!
//! Converts between A1-style references (e.g., "A1", "B2", "AA100") and
//! zero-indexed column/row coordinates. Addresses order by column first,
//! then by row.
//!
//! # Examples
//!
//! ```
//! use tabcalc_engine::engine::Address;
//!
//! let addr = Address::from_str("B3").unwrap();
//! assert_eq!(addr.col, 1); // 0-indexed
//! assert_eq!(addr.row, 2);
//! assert_eq!(addr.to_string(), "B3");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// A cell position (0-indexed). Field order gives the column-major `Ord`.
#[derive(Clone, Debug, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address {
    pub col: usize,
    pub row: usize,
}

/// Text that is not a valid A1-style address.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid cell address: {0:?}")]
pub struct ParseAddressError(pub String);

impl Address {
    pub fn new(col: usize, row: usize) -> Address {
        Address { col, row }
    }

    /// Parse an address from A1 notation (e.g., "A1", "B2", "AA10").
    /// Returns None if the input is invalid.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Option<Address> {
        Self::parse_a1(text)
    }

    fn parse_a1(text: &str) -> Option<Address> {
        let caps = address_re().captures(text)?;
        let letters = &caps["letters"];
        let digits = &caps["digits"];

        let mut col_acc = 0usize;
        for c in letters.bytes() {
            let digit = (c - b'A') as usize + 1;
            col_acc = col_acc.checked_mul(26)?.checked_add(digit)?;
        }
        let col = col_acc.checked_sub(1)?;

        // `usize` parsing takes an optional '+' and rejects '-'.
        let row = digits.parse::<usize>().ok()?.checked_sub(1)?;

        Some(Address::new(col, row))
    }

    /// Convert column index to letters (0 -> A, 25 -> Z, 26 -> AA).
    pub fn col_to_letters(col: usize) -> String {
        let mut letters = Vec::new();
        let mut rest = Some(col);
        while let Some(n) = rest {
            letters.push(b'A' + (n % 26) as u8);
            rest = (n / 26).checked_sub(1);
        }
        letters.iter().rev().map(|&b| b as char).collect()
    }
}

fn address_re() -> &'static Regex {
    static ADDRESS_RE: OnceLock<Regex> = OnceLock::new();
    ADDRESS_RE.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Z]+)(?<digits>[+-]?[0-9]+)$")
            .expect("address regex must compile")
    })
}

impl std::str::FromStr for Address {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_a1(s).ok_or_else(|| ParseAddressError(s.to_string()))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Address::col_to_letters(self.col), self.row + 1)
    }
}
