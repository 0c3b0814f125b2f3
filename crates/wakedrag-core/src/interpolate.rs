use std::collections::BTreeMap;

use crate::normalize::{MeasurementRow, MeasurementTable};

/// Bounding rows of `y`: the first row with the greatest position `<= y` and
/// the first row with the smallest position `>= y`.
fn bounds(table: &MeasurementTable, y: f64) -> (Option<&MeasurementRow>, Option<&MeasurementRow>) {
    let mut lower: Option<&MeasurementRow> = None;
    let mut upper: Option<&MeasurementRow> = None;

    for row in table.rows() {
        let z = row.position_mm;
        if z <= y && lower.map_or(true, |current| z > current.position_mm) {
            lower = Some(row);
        }
        if z >= y && upper.map_or(true, |current| z < current.position_mm) {
            upper = Some(row);
        }
    }

    (lower, upper)
}

/// Linear interpolation of `column` at position `y` (mm).
///
/// Outside the measured range the nearest row's value is returned unchanged.
/// `None` when the table is empty or a bounding row has no value for the
/// column.
pub fn interpolate_column(table: &MeasurementTable, y: f64, column: &str) -> Option<f64> {
    match bounds(table, y) {
        (Some(lower), Some(upper)) if !std::ptr::eq(lower, upper) => {
            let p_lower = lower.value(column)?;
            let p_upper = upper.value(column)?;
            let fraction = (y - lower.position_mm) / (upper.position_mm - lower.position_mm);
            Some(p_lower + (p_upper - p_lower) * fraction)
        }
        (Some(bound), _) | (None, Some(bound)) => bound.value(column),
        (None, None) => None,
    }
}

/// Interpolates every column in `columns` at `y`, each independently.
pub fn interpolate_pressures<I, S>(
    table: &MeasurementTable,
    y: f64,
    columns: I,
) -> BTreeMap<String, Option<f64>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    columns
        .into_iter()
        .map(|column| {
            let column = column.as_ref();
            (column.to_string(), interpolate_column(table, y, column))
        })
        .collect()
}
