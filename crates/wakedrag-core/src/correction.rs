use serde::Serialize;
use tracing::{info, warn};

use crate::config::SignCorrectionPolicy;
use crate::normalize::MeasurementTable;
use crate::schema::TableSchema;

/// What the sign corrector saw and did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignCorrection {
    pub policy: SignCorrectionPolicy,
    pub applied: bool,
    /// Rows whose wake reading is below zero, out of `wake_rows` rows that
    /// have a wake reading at all.
    pub negative_rows: usize,
    pub wake_rows: usize,
    pub atmospheric_offset: Option<f64>,
    pub corrected_cells: usize,
}

/// Repairs total-pressure readings logged relative to atmosphere.
///
/// When `policy` triggers on the wake column, the first row's atmospheric
/// pressure is added to every negative value of every total-pressure column.
/// The input table is left untouched; the returned table is the working copy.
pub fn apply_sign_correction(
    table: &MeasurementTable,
    schema: &TableSchema,
    policy: SignCorrectionPolicy,
) -> (MeasurementTable, SignCorrection) {
    let wake_values: Vec<f64> = table
        .rows()
        .iter()
        .filter_map(|row| row.value(&schema.wake))
        .collect();
    let negative_rows = wake_values.iter().filter(|value| **value < 0.0).count();

    let mut report = SignCorrection {
        policy,
        applied: false,
        negative_rows,
        wake_rows: wake_values.len(),
        atmospheric_offset: None,
        corrected_cells: 0,
    };
    let mut corrected = table.clone();

    if !policy.triggers(negative_rows, wake_values.len()) {
        return (corrected, report);
    }

    let offset = schema
        .atmospheric
        .as_deref()
        .and_then(|column| table.rows().first().and_then(|row| row.value(column)));
    let Some(offset) = offset else {
        warn!(
            wake = schema.wake.as_str(),
            negative_rows,
            "negative wake pressures but no atmospheric reading; skipping sign correction"
        );
        return (corrected, report);
    };

    for row in corrected.rows_mut() {
        for column in &schema.total_pressure {
            if let Some(value) = row.value(column).filter(|value| *value < 0.0) {
                row.set_value(column.as_str(), value + offset);
                report.corrected_cells += 1;
            }
        }
    }

    if report.corrected_cells == 0 {
        return (corrected, report);
    }

    report.applied = true;
    report.atmospheric_offset = Some(offset);
    info!(
        offset,
        cells = report.corrected_cells,
        policy = %policy,
        "applied sign correction to total-pressure columns"
    );

    (corrected, report)
}
