use std::fs;
use std::path::Path;

use crate::errors::{FormatAttempt, ParserError};
use crate::formats::{CommaSeparatedFormat, SemicolonSeparatedFormat, WorkbookFormat};
use crate::model::{ParsedTable, RawTable};

pub trait TableFormat {
    fn name(&self) -> &'static str;
    fn parse(&self, content: &str) -> Result<RawTable, ParserError>;
}

pub fn parse_table(content: &str) -> Result<ParsedTable, ParserError> {
    let comma = CommaSeparatedFormat;
    let semicolon = SemicolonSeparatedFormat;
    let formats: [&dyn TableFormat; 2] = [&comma, &semicolon];
    parse_with_formats(content, &formats)
}

/// `.xlsx` files are read as workbooks; anything else is treated as text.
pub fn parse_table_file(path: impl AsRef<Path>) -> Result<ParsedTable, ParserError> {
    let path = path.as_ref();
    let io_error = |source: std::io::Error| ParserError::Io {
        path: path.to_path_buf(),
        source,
    };

    let is_workbook = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));
    if is_workbook {
        let bytes = fs::read(path).map_err(io_error)?;
        return parse_workbook(&bytes);
    }

    let content = fs::read_to_string(path).map_err(io_error)?;
    parse_table(&content)
}

pub fn parse_workbook(bytes: &[u8]) -> Result<ParsedTable, ParserError> {
    let format = WorkbookFormat;
    let table = format.parse_bytes(bytes)?;
    Ok(ParsedTable {
        file_hash: blake3::hash(bytes).to_hex().to_string(),
        format: format.name(),
        table,
    })
}

pub fn parse_with_formats(
    content: &str,
    formats: &[&dyn TableFormat],
) -> Result<ParsedTable, ParserError> {
    let body = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut attempts = Vec::new();

    for format in formats {
        match format.parse(body) {
            Ok(table) => {
                return Ok(ParsedTable {
                    file_hash: blake3::hash(content.as_bytes()).to_hex().to_string(),
                    format: format.name(),
                    table,
                })
            }
            Err(ParserError::FormatMismatch { reason, .. }) => {
                attempts.push(FormatAttempt::new(format.name(), reason));
            }
            Err(err) => return Err(err),
        }
    }

    Err(ParserError::NoMatchingFormat { attempts })
}
