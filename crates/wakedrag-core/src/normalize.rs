use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, warn};
use wakedrag_parser::{RawTable, RawValue};

use crate::error::CalculationError;
use crate::schema::{TableSchema, POSITION_COLUMN};

/// One traverse position with its numeric readings keyed by column name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementRow {
    pub position_mm: f64,
    values: HashMap<String, f64>,
}

impl MeasurementRow {
    pub fn new(position_mm: f64) -> Self {
        Self {
            position_mm,
            values: HashMap::new(),
        }
    }

    pub fn with_value(mut self, column: impl Into<String>, value: f64) -> Self {
        self.set_value(column, value);
        self
    }

    pub fn value(&self, column: &str) -> Option<f64> {
        self.values.get(column).copied()
    }

    pub fn set_value(&mut self, column: impl Into<String>, value: f64) {
        self.values.insert(column.into(), value);
    }

    pub fn values(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(key, value)| (key.as_str(), *value))
    }
}

/// Measurement rows in ascending position order. The ordering is established
/// on construction and every constructor keeps it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MeasurementTable {
    rows: Vec<MeasurementRow>,
}

impl MeasurementTable {
    /// Sorts by position; equal positions keep their relative input order.
    pub fn from_rows(mut rows: Vec<MeasurementRow>) -> Self {
        rows.sort_by(|a, b| a.position_mm.total_cmp(&b.position_mm));
        Self { rows }
    }

    pub fn rows(&self) -> &[MeasurementRow] {
        &self.rows
    }

    /// Values may change but positions must not, or the ordering breaks.
    pub(crate) fn rows_mut(&mut self) -> &mut [MeasurementRow] {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn positions(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.position_mm).collect()
    }

    pub fn column(&self, column: &str) -> Vec<Option<f64>> {
        self.rows.iter().map(|row| row.value(column)).collect()
    }
}

/// Numeric reading of a raw cell. Blank cells and `nan` markers read as
/// missing; text falls back to a decimal comma (`"12,5"`) when plain parsing
/// fails.
pub fn coerce_value(value: &RawValue) -> Option<f64> {
    match value {
        RawValue::Number(number) => Some(*number),
        RawValue::Empty => None,
        RawValue::Text(text) => parse_number(text),
    }
}

fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        return None;
    }
    if let Ok(parsed) = trimmed.parse::<f64>() {
        return Some(parsed);
    }
    if trimmed.matches(',').count() == 1 && !trimmed.contains('.') {
        return trimmed.replacen(',', ".", 1).parse::<f64>().ok();
    }
    None
}

/// Turns raw rows into a sorted [`MeasurementTable`].
///
/// Rows without a usable position are dropped. Other cells are coerced to
/// numbers; cells that are not numeric are left out of the row and reported
/// when they belong to a column the calculation reads.
pub fn normalize(
    raw: &RawTable,
    schema: &TableSchema,
) -> Result<MeasurementTable, CalculationError> {
    if !schema.has_position {
        warn!(
            column = POSITION_COLUMN,
            rows = raw.len(),
            "table has no position column; every row is dropped"
        );
        return Err(CalculationError::InsufficientData { rows: 0 });
    }

    let numeric_columns: Vec<&str> = schema.numeric_columns().collect();
    let mut rows = Vec::with_capacity(raw.len());
    let mut dropped = 0usize;

    for (index, raw_row) in raw.rows.iter().enumerate() {
        let position = match raw_row.get(POSITION_COLUMN) {
            Some(value) if !value.is_blank() => {
                match coerce_value(value).filter(|position| position.is_finite()) {
                    Some(position) => position,
                    None => {
                        warn!(row = index, value = %value, "dropping row with non-numeric position");
                        dropped += 1;
                        continue;
                    }
                }
            }
            _ => {
                dropped += 1;
                continue;
            }
        };

        let mut row = MeasurementRow::new(position);
        for (column, value) in raw_row.iter() {
            if column == POSITION_COLUMN || value.is_blank() {
                continue;
            }
            match coerce_value(value) {
                Some(number) => row.set_value(column, number),
                None if numeric_columns.contains(&column) => {
                    warn!(row = index, column, value = %value, "ignoring non-numeric cell");
                }
                None => {}
            }
        }
        rows.push(row);
    }

    if dropped > 0 {
        debug!(dropped, "dropped rows without a position");
    }

    let table = MeasurementTable::from_rows(rows);
    if table.len() < 2 {
        return Err(CalculationError::InsufficientData { rows: table.len() });
    }

    info!(rows = table.len(), "normalized measurement table");
    Ok(table)
}
