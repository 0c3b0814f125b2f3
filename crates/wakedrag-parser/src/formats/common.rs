use crate::errors::ParserError;
use crate::model::{RawRow, RawTable, RawValue};

/// First non-blank line of the file, which is where the header lives.
pub(crate) fn header_line(content: &str) -> Option<&str> {
    content.lines().find(|line| !line.trim().is_empty())
}

pub(crate) fn read_delimited(
    format: &'static str,
    content: &str,
    delimiter: u8,
) -> Result<RawTable, ParserError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(content.as_bytes());

    let mut records = reader.records();

    let header = records
        .next()
        .ok_or(ParserError::EmptyData { format })?
        .map_err(|err| ParserError::Csv {
            format,
            source: err,
        })?;
    let columns = parse_header(format, header.iter())?;

    let mut table = RawTable::new(
        columns
            .iter()
            .filter_map(|column| column.clone())
            .collect(),
    );

    for record in records {
        let record = record.map_err(|err| ParserError::Csv {
            format,
            source: err,
        })?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let mut row = RawRow::new();
        for (idx, column) in columns.iter().enumerate() {
            let Some(name) = column else {
                continue;
            };
            let cell = record.get(idx).unwrap_or_default();
            row.insert(name.as_str(), RawValue::from_cell(cell));
        }
        table.rows.push(row);
    }

    if table.rows.is_empty() {
        return Err(ParserError::EmptyData { format });
    }

    Ok(table)
}

/// Unnamed columns (typically a trailing delimiter in spreadsheet exports) map
/// to `None` and are skipped when reading rows.
pub(crate) fn parse_header<'a>(
    format: &'static str,
    header: impl IntoIterator<Item = &'a str>,
) -> Result<Vec<Option<String>>, ParserError> {
    let mut seen: Vec<&str> = Vec::new();
    let mut columns = Vec::new();

    for field in header {
        let name = field.trim();
        if name.is_empty() {
            columns.push(None);
            continue;
        }
        if seen.contains(&name) {
            return Err(ParserError::InvalidHeader {
                format,
                message: format!("duplicate column '{name}'"),
            });
        }
        seen.push(name);
        columns.push(Some(name.to_string()));
    }

    if seen.is_empty() {
        return Err(ParserError::InvalidHeader {
            format,
            message: "header row has no named columns".to_string(),
        });
    }

    Ok(columns)
}
