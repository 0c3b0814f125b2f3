use serde::Serialize;

use crate::config::PhysicalConstants;
use crate::error::{CalculationError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DragCoefficients {
    /// `0.5 * rho * U_stream²` (Pa).
    pub dynamic_pressure: f64,
    pub drag_coefficient: f64,
    /// `C_D * area` (m²), often written SCD.
    pub drag_area: f64,
}

/// Normalizes `total_drag` by dynamic pressure and reference area.
pub fn drag_coefficients(total_drag: f64, constants: &PhysicalConstants) -> Result<DragCoefficients> {
    let dynamic_pressure = constants.dynamic_pressure();
    let drag_coefficient = total_drag / (dynamic_pressure * constants.area);

    if !drag_coefficient.is_finite() {
        return Err(CalculationError::NonFiniteResult {
            value: drag_coefficient,
        });
    }

    Ok(DragCoefficients {
        dynamic_pressure,
        drag_coefficient,
        drag_area: drag_coefficient * constants.area,
    })
}
