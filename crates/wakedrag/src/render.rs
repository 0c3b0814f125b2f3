use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use serde::Serialize;
use wakedrag_core::{CalculationOptions, CalculationResult, PhysicalConstants, TableSchema};
use wakedrag_parser::ParsedTable;

/// What `calculate --json` prints: the result plus where it came from.
#[derive(Debug, Serialize)]
pub struct CalculationReport<'a> {
    pub source: String,
    pub file_hash: &'a str,
    pub format: &'static str,
    pub constants: PhysicalConstants,
    pub options: CalculationOptions,
    pub result: &'a CalculationResult,
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn number(value: impl Into<String>) -> Cell {
    Cell::new(value.into()).set_alignment(CellAlignment::Right)
}

pub fn format_optional(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(value) if value.is_finite() => format!("{value:.precision$}"),
        Some(value) => value.to_string(),
        None => "-".to_string(),
    }
}

pub fn summary_table(report: &CalculationReport<'_>) -> Table {
    let result = report.result;
    let correction = &result.sign_correction;

    let mut table = new_table();
    table.set_header(vec!["Quantity", "Value"]);
    table.add_row(vec![Cell::new("Drag (N)"), number(format!("{:.4}", result.total_drag))]);
    table.add_row(vec![
        Cell::new("C_D"),
        number(format!("{:.4}", result.drag_coefficient)),
    ]);
    table.add_row(vec![
        Cell::new("SCD (m²)"),
        number(format!("{:.6}", result.drag_area)),
    ]);
    table.add_row(vec![
        Cell::new("Dynamic pressure (Pa)"),
        number(format!("{:.2}", result.dynamic_pressure)),
    ]);
    table.add_row(vec![Cell::new("Wake column"), Cell::new(&result.wake_column)]);
    table.add_row(vec![
        Cell::new("Segments"),
        number(result.segment_count.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Sign correction"),
        Cell::new(if correction.applied {
            format!(
                "applied ({}), +{} Pa on {} cell(s)",
                correction.policy,
                format_optional(correction.atmospheric_offset, 1),
                correction.corrected_cells
            )
        } else {
            format!(
                "not applied ({}), {}/{} wake readings negative",
                correction.policy, correction.negative_rows, correction.wake_rows
            )
        }),
    ]);
    for (column, value) in result
        .static_at_reference
        .iter()
        .chain(result.freestream_at_reference.iter())
    {
        table.add_row(vec![
            Cell::new(format!("{column} @ {} mm (Pa)", result.reference_position_mm)),
            number(format_optional(*value, 2)),
        ]);
    }
    table.add_row(vec![Cell::new("Source hash"), Cell::new(report.file_hash)]);
    table
}

/// One line per traverse position; segment terms sit on the row that opens
/// the segment, so the last row has none.
pub fn profile_table(result: &CalculationResult) -> Table {
    let profile = &result.profile;

    let mut table = new_table();
    table.set_header(vec![
        "z (mm)",
        "P_tot wake (Pa)",
        "U wake (m/s)",
        "dA (m²)",
        "Momentum loss (N)",
    ]);

    for (index, position) in profile.positions_mm.iter().enumerate() {
        let segment = profile.segments.get(index);
        table.add_row(vec![
            number(position.to_string()),
            number(format_optional(profile.wake_pressures.get(index).copied(), 1)),
            number(format_optional(profile.wake_velocities.get(index).copied(), 2)),
            number(
                segment
                    .map(|segment| format!("{:.3e}", segment.area_element))
                    .unwrap_or_else(|| "-".to_string()),
            ),
            number(format_optional(segment.map(|segment| segment.momentum_loss), 6)),
        ]);
    }
    table
}

pub fn schema_table(parsed: &ParsedTable, schema: &TableSchema) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Column", "Role"]);

    for column in &parsed.table.columns {
        let role = if column == wakedrag_core::schema::POSITION_COLUMN {
            "position"
        } else if *column == schema.wake {
            "wake total pressure"
        } else if schema.total_pressure.contains(column) {
            "total pressure"
        } else if schema.static_pressure.contains(column) {
            "static pressure"
        } else if schema.atmospheric.as_ref() == Some(column) {
            "atmospheric pressure"
        } else if schema.freestream.as_ref() == Some(column) {
            "freestream total pressure"
        } else {
            "unused"
        };
        table.add_row(vec![Cell::new(column), Cell::new(role)]);
    }
    table
}
