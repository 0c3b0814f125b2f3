use crate::errors::ParserError;
use crate::model::RawTable;
use crate::registry::TableFormat;

use super::{header_line, read_delimited};

/// Semicolon-delimited export as written by spreadsheet tools in locales that
/// use a decimal comma. Cells stay as text; `"12,5"` is resolved downstream.
#[derive(Debug, Default, Clone, Copy)]
pub struct SemicolonSeparatedFormat;

impl SemicolonSeparatedFormat {
    const NAME: &'static str = "CSV_SEMICOLON";
}

impl TableFormat for SemicolonSeparatedFormat {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(&self, content: &str) -> Result<RawTable, ParserError> {
        let header = header_line(content).ok_or(ParserError::EmptyData { format: Self::NAME })?;
        if !header.contains(';') {
            return Err(ParserError::FormatMismatch {
                format: Self::NAME,
                reason: "header has no semicolon delimiter".to_string(),
            });
        }
        read_delimited(Self::NAME, content, b';')
    }
}
