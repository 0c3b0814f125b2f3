use serde::Serialize;
use tracing::debug;

use crate::error::CalculationError;

pub const POSITION_COLUMN: &str = "z (mm)";
pub const TOTAL_PRESSURE_PREFIX: &str = "P_tot_y_";
pub const STATIC_PRESSURE_PREFIX: &str = "P_stat_y_";
pub const FREESTREAM_COLUMN: &str = "P_tot_stream";
/// Accepted atmospheric-pressure headers, most preferred first.
pub const ATMOSPHERIC_COLUMNS: [&str; 2] = ["P_atm (Pa)", "P_atm"];

/// Name of the total-pressure column measured at `position_mm`, e.g.
/// `P_tot_y_10` for 10 mm.
pub fn total_pressure_column(position_mm: f64) -> String {
    format!("{TOTAL_PRESSURE_PREFIX}{position_mm}")
}

/// Roles of the header columns, resolved once per table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSchema {
    pub has_position: bool,
    pub total_pressure: Vec<String>,
    pub static_pressure: Vec<String>,
    pub atmospheric: Option<String>,
    pub freestream: Option<String>,
    /// Total-pressure series integrated as the wake.
    pub wake: String,
}

impl TableSchema {
    /// Classifies `columns` (in header order). The wake column is the
    /// total-pressure column at the reference position when present, else the
    /// first total-pressure column in header order.
    pub fn discover<S: AsRef<str>>(
        columns: &[S],
        reference_position_mm: f64,
    ) -> Result<Self, CalculationError> {
        let mut has_position = false;
        let mut total_pressure = Vec::new();
        let mut static_pressure = Vec::new();
        let mut freestream = None;

        for column in columns.iter().map(AsRef::as_ref) {
            if column == POSITION_COLUMN {
                has_position = true;
            } else if column.starts_with(TOTAL_PRESSURE_PREFIX) {
                total_pressure.push(column.to_string());
            } else if column.starts_with(STATIC_PRESSURE_PREFIX) {
                static_pressure.push(column.to_string());
            } else if column == FREESTREAM_COLUMN {
                freestream = Some(column.to_string());
            }
        }

        let atmospheric = ATMOSPHERIC_COLUMNS
            .into_iter()
            .find(|candidate| columns.iter().any(|column| column.as_ref() == *candidate))
            .map(|column| column.to_string());

        let canonical = total_pressure_column(reference_position_mm);
        let wake = if total_pressure.contains(&canonical) {
            canonical
        } else {
            total_pressure
                .first()
                .cloned()
                .ok_or(CalculationError::MissingWakeColumn {
                    prefix: TOTAL_PRESSURE_PREFIX,
                })?
        };

        debug!(
            wake = wake.as_str(),
            total = total_pressure.len(),
            static_columns = static_pressure.len(),
            atmospheric = atmospheric.as_deref(),
            "discovered table schema"
        );

        Ok(Self {
            has_position,
            total_pressure,
            static_pressure,
            atmospheric,
            freestream,
            wake,
        })
    }

    /// Every column whose values take part in the calculation.
    pub fn numeric_columns(&self) -> impl Iterator<Item = &str> {
        self.total_pressure
            .iter()
            .chain(self.static_pressure.iter())
            .chain(self.atmospheric.iter())
            .chain(self.freestream.iter())
            .map(String::as_str)
    }
}
