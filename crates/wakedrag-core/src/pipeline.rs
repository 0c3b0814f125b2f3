use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};
use wakedrag_parser::RawTable;

use crate::coefficient::drag_coefficients;
use crate::config::{CalculationOptions, PhysicalConstants, WakeConfig};
use crate::correction::{apply_sign_correction, SignCorrection};
use crate::error::{CalculationError, Result};
use crate::integrate::integrate_wake;
use crate::interpolate::interpolate_pressures;
use crate::normalize::{normalize, MeasurementTable};
use crate::profile::WakeProfile;
use crate::schema::TableSchema;

/// Everything one calculation produces. Built once and never modified.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResult {
    /// Drag force (N).
    pub total_drag: f64,
    pub drag_coefficient: f64,
    /// `C_D * area` (m²).
    pub drag_area: f64,
    pub dynamic_pressure: f64,
    pub segment_count: usize,
    pub wake_column: String,
    pub reference_position_mm: f64,
    pub sign_correction: SignCorrection,
    /// Static-pressure columns interpolated at the reference position.
    pub static_at_reference: BTreeMap<String, Option<f64>>,
    /// Freestream column interpolated at the reference position; empty when
    /// the table has no freestream column.
    pub freestream_at_reference: BTreeMap<String, Option<f64>>,
    pub profile: WakeProfile,
}

/// Immutable snapshot of constants and options, run against any number of
/// tables.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WakeCalculator {
    constants: PhysicalConstants,
    options: CalculationOptions,
}

impl WakeCalculator {
    pub fn new(constants: PhysicalConstants, options: CalculationOptions) -> Self {
        Self { constants, options }
    }

    pub fn from_config(config: &WakeConfig) -> Self {
        Self::new(config.constants, config.options)
    }

    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    pub fn options(&self) -> &CalculationOptions {
        &self.options
    }

    pub fn run(&self, raw: &RawTable) -> Result<CalculationResult> {
        if raw.is_empty() {
            return Err(CalculationError::EmptyInput);
        }
        self.constants.validate()?;

        let reference = self.options.reference_position_mm;
        let schema = TableSchema::discover(&raw.columns, reference)?;
        let table = normalize(raw, &schema)?;

        let static_at_reference = interpolate_pressures(&table, reference, &schema.static_pressure);
        let freestream_at_reference = interpolate_pressures(&table, reference, &schema.freestream);
        debug!(
            reference,
            static_columns = static_at_reference.len(),
            "interpolated reference pressures"
        );

        let (corrected, sign_correction) =
            apply_sign_correction(&table, &schema, self.options.sign_correction);
        self.check_below_freestream(&corrected, &schema.wake)?;

        let profile = integrate_wake(
            &corrected,
            &schema.wake,
            &self.constants,
            self.options.integration,
        );
        let total_drag = profile.total_drag();
        let coefficients = drag_coefficients(total_drag, &self.constants)?;

        info!(
            wake = schema.wake.as_str(),
            rows = table.len(),
            drag = total_drag,
            cd = coefficients.drag_coefficient,
            "calculated wake drag"
        );

        Ok(CalculationResult {
            total_drag,
            drag_coefficient: coefficients.drag_coefficient,
            drag_area: coefficients.drag_area,
            dynamic_pressure: coefficients.dynamic_pressure,
            segment_count: profile.segment_count(),
            wake_column: schema.wake,
            reference_position_mm: reference,
            sign_correction,
            static_at_reference,
            freestream_at_reference,
            profile,
        })
    }

    /// Wake readings at or above the freestream total pressure would be
    /// hidden by the velocity clamp, so they are rejected up front.
    fn check_below_freestream(&self, table: &MeasurementTable, wake_column: &str) -> Result<()> {
        let freestream = self.constants.freestream_total_pressure;
        for row in table.rows() {
            if let Some(pressure) = row.value(wake_column) {
                if pressure >= freestream {
                    return Err(CalculationError::PhysicallyInconsistentData {
                        column: wake_column.to_string(),
                        position_mm: row.position_mm,
                        wake_pressure: pressure,
                        freestream_pressure: freestream,
                    });
                }
            }
        }
        Ok(())
    }
}

/// One-shot form of [`WakeCalculator::run`].
pub fn calculate(
    raw: &RawTable,
    constants: PhysicalConstants,
    options: CalculationOptions,
) -> Result<CalculationResult> {
    WakeCalculator::new(constants, options).run(raw)
}
