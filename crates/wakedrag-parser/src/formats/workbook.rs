use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use crate::errors::ParserError;
use crate::model::{RawRow, RawTable, RawValue};

use super::parse_header;

/// Excel workbook (`.xlsx`). Only the first sheet is read; its first used row
/// is the header.
#[derive(Debug, Default, Clone, Copy)]
pub struct WorkbookFormat;

impl WorkbookFormat {
    pub const NAME: &'static str = "XLSX";

    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<RawTable, ParserError> {
        let mut workbook: Xlsx<_> =
            Xlsx::new(Cursor::new(bytes)).map_err(|source| ParserError::Workbook {
                format: Self::NAME,
                source,
            })?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or(ParserError::EmptyData { format: Self::NAME })?
            .map_err(|source| ParserError::Workbook {
                format: Self::NAME,
                source,
            })?;

        let mut rows = range.rows();
        let header = rows
            .next()
            .ok_or(ParserError::EmptyData { format: Self::NAME })?;
        let names: Vec<String> = header.iter().map(|cell| cell.to_string()).collect();
        let columns = parse_header(Self::NAME, names.iter().map(String::as_str))?;

        let mut table = RawTable::new(columns.iter().flatten().cloned().collect());

        for cells in rows {
            let values: Vec<RawValue> = cells.iter().map(cell_value).collect();
            if values.iter().all(RawValue::is_blank) {
                continue;
            }

            let mut row = RawRow::new();
            for (idx, column) in columns.iter().enumerate() {
                let Some(name) = column else {
                    continue;
                };
                let value = values.get(idx).cloned().unwrap_or(RawValue::Empty);
                row.insert(name.as_str(), value);
            }
            table.rows.push(row);
        }

        if table.rows.is_empty() {
            return Err(ParserError::EmptyData { format: Self::NAME });
        }

        Ok(table)
    }
}

/// Numeric cells keep their value; everything else goes through the same text
/// path as CSV cells.
fn cell_value(cell: &Data) -> RawValue {
    match cell {
        Data::Float(value) => RawValue::Number(*value),
        Data::Int(value) => RawValue::Number(*value as f64),
        Data::Empty => RawValue::Empty,
        Data::String(text) => RawValue::from_cell(text),
        other => RawValue::from_cell(&other.to_string()),
    }
}
