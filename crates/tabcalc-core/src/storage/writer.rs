//! Writer for resolved grids.

use crate::error::Result;
use std::io::Write;
use tabcalc_engine::engine::{Address, Sheet};

const DELIMITER: &str = "\t";

/// Render a sheet row by row, cells separated by tabs, one line per row.
pub fn render_sheet(sheet: &Sheet) -> String {
    let mut out = String::new();
    for row in 0..sheet.rows() {
        let fields: Vec<_> = (0..sheet.cols())
            .map(|col| {
                sheet
                    .get_display(&Address::new(col, row))
                    .unwrap_or_default()
            })
            .collect();
        out.push_str(&fields.join(DELIMITER));
        out.push('\n');
    }
    out
}

/// Write a rendered sheet to `out`.
pub fn write_sheet<W: Write>(out: &mut W, sheet: &Sheet) -> Result<()> {
    out.write_all(render_sheet(sheet).as_bytes())?;
    out.flush()?;
    Ok(())
}
