use crate::errors::ParserError;
use crate::model::RawTable;
use crate::registry::TableFormat;

use super::{header_line, read_delimited};

/// Plain comma-separated export, the common case.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommaSeparatedFormat;

impl CommaSeparatedFormat {
    const NAME: &'static str = "CSV_COMMA";
}

impl TableFormat for CommaSeparatedFormat {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(&self, content: &str) -> Result<RawTable, ParserError> {
        let header = header_line(content).ok_or(ParserError::EmptyData { format: Self::NAME })?;
        if header.contains(';') && !header.contains(',') {
            return Err(ParserError::FormatMismatch {
                format: Self::NAME,
                reason: "header is semicolon-delimited".to_string(),
            });
        }
        read_delimited(Self::NAME, content, b',')
    }
}
