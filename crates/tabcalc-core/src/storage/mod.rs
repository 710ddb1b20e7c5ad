//! Grid input and output.

pub mod reader;
pub mod writer;

pub use reader::{parse_sheet_content, read_sheet};
pub use writer::{render_sheet, write_sheet};
