use polars::prelude::*;
use wakedrag_core::{WakeProfile, WakeSegment};

fn profile() -> WakeProfile {
    WakeProfile {
        positions_mm: vec![0.0, 10.0, 20.0],
        wake_pressures: vec![100_000.0, 98_000.0, 100_000.0],
        wake_velocities: vec![89.0, 100.0, 89.0],
        segments: vec![
            WakeSegment {
                start_mm: 0.0,
                end_mm: 10.0,
                width_m: 0.01,
                area_element: 0.001,
                momentum_loss: -8.5,
            },
            WakeSegment {
                start_mm: 10.0,
                end_mm: 20.0,
                width_m: 0.01,
                area_element: 0.001,
                momentum_loss: -11.0,
            },
        ],
    }
}

#[test]
fn total_drag_sums_magnitudes() {
    assert!((profile().total_drag() - 19.5).abs() < 1e-12);
    assert_eq!(profile().momentum_losses(), vec![-8.5, -11.0]);
}

#[test]
fn rows_frame_has_one_row_per_position() -> PolarsResult<()> {
    let df = profile().rows_frame()?;

    assert_eq!(df.height(), 3);
    assert_eq!(
        df.get_column_names(),
        vec!["z_mm", "wake_total_pressure_pa", "wake_velocity_m_s"]
    );
    let velocity = df.column("wake_velocity_m_s")?.f64()?;
    assert_eq!(velocity.get(1), Some(100.0));
    Ok(())
}

#[test]
fn segments_frame_has_one_row_per_segment() -> PolarsResult<()> {
    let df = profile().segments_frame()?;

    assert_eq!(df.height(), 2);
    let area = df.column("area_element_m2")?.f64()?;
    assert_eq!(area.get(0), Some(0.001));
    let loss = df.column("momentum_loss_n")?.f64()?;
    assert_eq!(loss.get(1), Some(-11.0));
    Ok(())
}
