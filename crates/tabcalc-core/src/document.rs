//! A loaded grid together with where it came from.

use crate::config::LoadConfig;
use crate::error::Result;
use crate::storage::{parse_sheet_content, read_sheet, render_sheet, write_sheet};
use std::io::Write;
use std::path::{Path, PathBuf};
use tabcalc_engine::engine::{ResolveSummary, Sheet};

pub struct Document {
    pub sheet: Sheet,
    /// Source file, or None when read from a stream.
    pub file_path: Option<PathBuf>,
    /// Set once the sheet has been resolved.
    pub summary: Option<ResolveSummary>,
}

impl Document {
    pub fn from_content(content: &str, config: &LoadConfig) -> Result<Self> {
        Ok(Document {
            sheet: parse_sheet_content(content, config)?,
            file_path: None,
            summary: None,
        })
    }

    pub fn from_file(path: &Path, config: &LoadConfig) -> Result<Self> {
        Ok(Document {
            sheet: read_sheet(path, config)?,
            file_path: Some(path.to_path_buf()),
            summary: None,
        })
    }

    /// Resolve every cell. Later calls return the stored summary.
    pub fn resolve(&mut self) -> ResolveSummary {
        if let Some(summary) = self.summary {
            return summary;
        }
        let summary = self.sheet.resolve_all();
        self.summary = Some(summary);
        summary
    }

    /// Resolve (if needed) and render the grid.
    pub fn render(&mut self) -> String {
        self.resolve();
        render_sheet(&self.sheet)
    }

    pub fn write_to<W: Write>(&mut self, out: &mut W) -> Result<()> {
        self.resolve();
        write_sheet(out, &self.sheet)
    }
}
