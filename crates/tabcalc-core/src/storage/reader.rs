//! Reader for tab-delimited grids.
//!
//! The input is a `rows cols` header line followed by one line per row,
//! cells separated by tabs:
//!
//! ```text
//! 2 2
//! 5<TAB>=A1+3
//! 'hi<TAB>
//! ```
//!
//! Every slot of the `rows x cols` grid ends up holding a cell: text from
//! the input becomes an unresolved cell, and gaps get the configured
//! placeholder. Data outside the declared grid is dropped.

use crate::config::LoadConfig;
use crate::error::{Result, TabcalcError};
use std::fs;
use std::path::Path;
use tabcalc_engine::engine::{Address, Sheet};
use tracing::warn;

const DELIMITER: char = '\t';

/// Read a grid file into an unresolved sheet.
pub fn read_sheet(path: &Path, config: &LoadConfig) -> Result<Sheet> {
    let content = fs::read_to_string(path)?;
    parse_sheet_content(&content, config)
}

/// Parse grid content from a string.
pub fn parse_sheet_content(content: &str, config: &LoadConfig) -> Result<Sheet> {
    let mut lines = content.lines();

    let (rows, cols, first_data_line) = if config.header {
        let header = lines.next().ok_or_else(|| TabcalcError::Parse {
            line: 1,
            message: "Missing 'rows cols' header".to_string(),
        })?;
        let (rows, cols) = parse_header(header)?;
        (rows, cols, 2)
    } else {
        let rows = content.lines().count();
        let cols = content
            .lines()
            .map(|line| line.split(DELIMITER).count())
            .max()
            .unwrap_or(0);
        (rows, cols, 1)
    };

    let mut sheet = Sheet::new(rows, cols);

    for (row, line) in lines.enumerate() {
        let line_num = row + first_data_line;
        if row >= rows {
            warn!(line = line_num, rows, "ignoring row beyond declared grid");
            continue;
        }
        for (col, raw) in line.split(DELIMITER).enumerate() {
            if col >= cols {
                warn!(line = line_num, cols, "ignoring cells beyond declared grid");
                break;
            }
            sheet.insert_raw(Address::new(col, row), raw);
        }
    }

    for row in 0..rows {
        for col in 0..cols {
            let addr = Address::new(col, row);
            if !sheet.contains(&addr) {
                sheet.insert(addr, config.missing.placeholder());
            }
        }
    }

    Ok(sheet)
}

fn parse_header(line: &str) -> Result<(usize, usize)> {
    let bad_header = |message: String| TabcalcError::Parse { line: 1, message };

    let fields: Vec<&str> = line.split_whitespace().collect();
    let [rows, cols] = fields.as_slice() else {
        return Err(bad_header(format!(
            "Expected 'rows cols' header, got {:?}",
            line
        )));
    };
    let rows = rows
        .parse::<usize>()
        .map_err(|_| bad_header(format!("Invalid row count: {}", rows)))?;
    let cols = cols
        .parse::<usize>()
        .map_err(|_| bad_header(format!("Invalid column count: {}", cols)))?;
    Ok((rows, cols))
}
