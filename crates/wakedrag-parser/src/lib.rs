pub mod errors;
pub mod formats;
pub mod model;
mod registry;

pub use errors::{FormatAttempt, ParserError};
pub use model::{ParsedTable, RawRow, RawTable, RawValue};
pub use registry::{parse_table, parse_table_file, parse_with_formats, parse_workbook, TableFormat};
