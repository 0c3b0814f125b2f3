use polars::prelude::*;
use serde::Serialize;

/// Interval between two adjacent traverse positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WakeSegment {
    pub start_mm: f64,
    pub end_mm: f64,
    /// `|end - start|` in metres.
    pub width_m: f64,
    /// Test-section width times `width_m` (m²).
    pub area_element: f64,
    /// Signed momentum-loss contribution (N).
    pub momentum_loss: f64,
}

/// Per-row wake readings and per-segment integration terms of one run.
///
/// Row vectors are parallel and in ascending position order; `segments` has
/// one entry fewer than there are rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WakeProfile {
    pub positions_mm: Vec<f64>,
    pub wake_pressures: Vec<f64>,
    pub wake_velocities: Vec<f64>,
    pub segments: Vec<WakeSegment>,
}

impl WakeProfile {
    /// Sum of segment magnitudes; never negative.
    pub fn total_drag(&self) -> f64 {
        self.segments
            .iter()
            .map(|segment| segment.momentum_loss.abs())
            .sum()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn area_elements(&self) -> Vec<f64> {
        self.segments.iter().map(|s| s.area_element).collect()
    }

    pub fn momentum_losses(&self) -> Vec<f64> {
        self.segments.iter().map(|s| s.momentum_loss).collect()
    }

    pub fn rows_frame(&self) -> PolarsResult<DataFrame> {
        DataFrame::new(vec![
            Series::new("z_mm".into(), self.positions_mm.clone()).into(),
            Series::new("wake_total_pressure_pa".into(), self.wake_pressures.clone()).into(),
            Series::new("wake_velocity_m_s".into(), self.wake_velocities.clone()).into(),
        ])
    }

    pub fn segments_frame(&self) -> PolarsResult<DataFrame> {
        let column = |name: &str, pick: fn(&WakeSegment) -> f64| -> Column {
            Series::new(
                name.into(),
                self.segments.iter().map(pick).collect::<Vec<f64>>(),
            )
            .into()
        };

        DataFrame::new(vec![
            column("start_mm", |s| s.start_mm),
            column("end_mm", |s| s.end_mm),
            column("segment_width_m", |s| s.width_m),
            column("area_element_m2", |s| s.area_element),
            column("momentum_loss_n", |s| s.momentum_loss),
        ])
    }
}
