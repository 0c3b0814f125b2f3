use wakedrag_core::interpolate::{interpolate_column, interpolate_pressures};
use wakedrag_core::{MeasurementRow, MeasurementTable};

fn static_table() -> MeasurementTable {
    MeasurementTable::from_rows(vec![
        MeasurementRow::new(0.0)
            .with_value("P_stat_y_0", 100.0)
            .with_value("P_stat_y_10", -40.0),
        MeasurementRow::new(5.0)
            .with_value("P_stat_y_0", 140.0)
            .with_value("P_stat_y_10", -20.0),
        MeasurementRow::new(20.0)
            .with_value("P_stat_y_0", 80.0)
            .with_value("P_stat_y_10", 10.0),
    ])
}

#[test]
fn exact_position_returns_the_row_value() {
    let table = static_table();
    assert_eq!(interpolate_column(&table, 5.0, "P_stat_y_0"), Some(140.0));
    assert_eq!(interpolate_column(&table, 20.0, "P_stat_y_10"), Some(10.0));
}

#[test]
fn interior_position_is_linear_between_bounds() {
    let table = static_table();
    let value = interpolate_column(&table, 10.0, "P_stat_y_0").unwrap();
    let expected = 140.0 + (80.0 - 140.0) * (10.0 - 5.0) / (20.0 - 5.0);
    assert!((value - expected).abs() < 1e-12);
}

#[test]
fn interpolated_values_stay_within_bounds() {
    let table = static_table();
    for step in 0..=40 {
        let y = step as f64 * 0.5;
        let value = interpolate_column(&table, y, "P_stat_y_10").unwrap();
        let (low, high) = if y <= 5.0 { (-40.0, -20.0) } else { (-20.0, 10.0) };
        assert!(
            value >= low - 1e-12 && value <= high + 1e-12,
            "y = {y}: {value} outside [{low}, {high}]"
        );
    }
}

#[test]
fn outside_the_range_clamps_to_the_nearest_row() {
    let table = static_table();
    assert_eq!(interpolate_column(&table, -3.0, "P_stat_y_0"), Some(100.0));
    assert_eq!(interpolate_column(&table, 50.0, "P_stat_y_0"), Some(80.0));
}

#[test]
fn empty_table_yields_missing_values() {
    let table = MeasurementTable::default();
    let values = interpolate_pressures(&table, 10.0, ["P_stat_y_0", "P_tot_stream"]);

    assert_eq!(values.len(), 2);
    assert!(values.values().all(Option::is_none));
}

#[test]
fn bounding_row_without_the_column_yields_missing() {
    let table = MeasurementTable::from_rows(vec![
        MeasurementRow::new(0.0).with_value("P_stat_y_0", 1.0),
        MeasurementRow::new(20.0),
    ]);
    assert_eq!(interpolate_column(&table, 10.0, "P_stat_y_0"), None);
    assert_eq!(interpolate_column(&table, 0.0, "P_stat_y_0"), Some(1.0));
}

#[test]
fn columns_are_interpolated_independently() {
    let table = static_table();
    let values = interpolate_pressures(&table, 2.5, ["P_stat_y_0", "P_stat_y_10"]);

    assert_eq!(values["P_stat_y_0"], Some(120.0));
    assert_eq!(values["P_stat_y_10"], Some(-30.0));
}
