mod comma;
mod common;
mod semicolon;
mod workbook;

pub use comma::CommaSeparatedFormat;
pub use semicolon::SemicolonSeparatedFormat;
pub use workbook::WorkbookFormat;

pub(crate) use common::{header_line, parse_header, read_delimited};
