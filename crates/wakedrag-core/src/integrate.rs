use tracing::debug;

use crate::config::{IntegrationRule, PhysicalConstants};
use crate::normalize::MeasurementTable;
use crate::profile::{WakeProfile, WakeSegment};

const MM_PER_M: f64 = 1000.0;

/// Wake velocity recovered from total pressure with Bernoulli's equation.
///
/// A negative radicand (noise around the freestream pressure) yields `0.0`.
/// A missing reading (`NaN`) stays `NaN` so it surfaces as a non-finite
/// coefficient instead of a silent zero.
pub fn wake_velocity(wake_total_pressure: f64, constants: &PhysicalConstants) -> f64 {
    let radicand = 2.0 * (constants.freestream_total_pressure - wake_total_pressure)
        / constants.density
        + constants.freestream_velocity.powi(2);

    if radicand.is_nan() {
        f64::NAN
    } else {
        radicand.max(0.0).sqrt()
    }
}

/// Momentum deficit flux per unit area at wake velocity `u` (N/m²).
pub fn momentum_flux(u: f64, constants: &PhysicalConstants) -> f64 {
    constants.density * u * (constants.freestream_velocity - u)
}

/// Integrates the momentum deficit of `wake_column` across the traverse.
///
/// Every pair of adjacent rows forms one segment; rows lacking a wake reading
/// contribute `NaN`.
pub fn integrate_wake(
    table: &MeasurementTable,
    wake_column: &str,
    constants: &PhysicalConstants,
    rule: IntegrationRule,
) -> WakeProfile {
    let positions_mm = table.positions();
    let wake_pressures: Vec<f64> = table
        .column(wake_column)
        .into_iter()
        .map(|value| value.unwrap_or(f64::NAN))
        .collect();
    let wake_velocities: Vec<f64> = wake_pressures
        .iter()
        .map(|pressure| wake_velocity(*pressure, constants))
        .collect();

    let segments: Vec<WakeSegment> = positions_mm
        .windows(2)
        .zip(wake_velocities.windows(2))
        .map(|(z, u)| {
            let width_m = (z[1] - z[0]).abs() / MM_PER_M;
            let area_element = constants.width * width_m;
            let flux = match rule {
                IntegrationRule::LeadingEdge => momentum_flux(u[0], constants),
                IntegrationRule::Trapezoidal => {
                    0.5 * (momentum_flux(u[0], constants) + momentum_flux(u[1], constants))
                }
            };
            WakeSegment {
                start_mm: z[0],
                end_mm: z[1],
                width_m,
                area_element,
                momentum_loss: flux * area_element,
            }
        })
        .collect();

    let profile = WakeProfile {
        positions_mm,
        wake_pressures,
        wake_velocities,
        segments,
    };

    debug!(
        wake = wake_column,
        segments = profile.segment_count(),
        rule = %rule,
        drag = profile.total_drag(),
        "integrated wake momentum deficit"
    );

    profile
}
