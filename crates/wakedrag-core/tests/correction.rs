use wakedrag_core::correction::apply_sign_correction;
use wakedrag_core::{MeasurementRow, MeasurementTable, SignCorrectionPolicy, TableSchema};

const COLUMNS: [&str; 4] = ["z (mm)", "P_tot_y_10", "P_tot_y_20", "P_atm (Pa)"];

fn table(wake: &[f64], other: &[f64], atm: Option<f64>) -> MeasurementTable {
    let rows = wake
        .iter()
        .zip(other)
        .enumerate()
        .map(|(index, (wake, other))| {
            let mut row = MeasurementRow::new(index as f64 * 10.0)
                .with_value("P_tot_y_10", *wake)
                .with_value("P_tot_y_20", *other);
            if let Some(atm) = atm {
                row.set_value("P_atm (Pa)", atm);
            }
            row
        })
        .collect();
    MeasurementTable::from_rows(rows)
}

fn schema() -> TableSchema {
    TableSchema::discover(&COLUMNS, 10.0).unwrap()
}

#[test]
fn all_negative_wake_is_shifted_by_atmospheric_pressure() {
    let input = table(&[-5.0, -3.0, -2.0], &[-1.0, 4.0, -6.0], Some(10.0));
    let (corrected, report) =
        apply_sign_correction(&input, &schema(), SignCorrectionPolicy::AllNegative);

    assert!(report.applied);
    assert_eq!(report.atmospheric_offset, Some(10.0));
    assert_eq!(
        corrected.column("P_tot_y_10"),
        vec![Some(5.0), Some(7.0), Some(8.0)]
    );
    // every total-pressure column is corrected, positive values are kept
    assert_eq!(
        corrected.column("P_tot_y_20"),
        vec![Some(9.0), Some(4.0), Some(4.0)]
    );
    assert_eq!(report.corrected_cells, 5);
}

#[test]
fn mixed_signs_are_left_alone() {
    let input = table(&[-5.0, 3.0, -2.0], &[-1.0, -1.0, -1.0], Some(10.0));
    let (corrected, report) =
        apply_sign_correction(&input, &schema(), SignCorrectionPolicy::AllNegative);

    assert!(!report.applied);
    assert_eq!(report.negative_rows, 2);
    assert_eq!(corrected, input);
}

#[test]
fn input_table_is_not_mutated() {
    let input = table(&[-5.0, -3.0, -2.0], &[-1.0, -1.0, -1.0], Some(10.0));
    let snapshot = input.clone();
    let _ = apply_sign_correction(&input, &schema(), SignCorrectionPolicy::AllNegative);

    assert_eq!(input, snapshot);
}

#[test]
fn disabled_policy_never_corrects() {
    let input = table(&[-5.0, -3.0, -2.0], &[-1.0, -1.0, -1.0], Some(10.0));
    let (corrected, report) =
        apply_sign_correction(&input, &schema(), SignCorrectionPolicy::Disabled);

    assert!(!report.applied);
    assert_eq!(corrected, input);
}

#[test]
fn threshold_policy_corrects_partial_negativity() {
    let input = table(&[-5.0, 3.0, -2.0], &[0.0, 0.0, 0.0], Some(10.0));
    let policy = SignCorrectionPolicy::Threshold {
        min_negative_fraction: 0.5,
    };
    let (corrected, report) = apply_sign_correction(&input, &schema(), policy);

    assert!(report.applied);
    assert_eq!(
        corrected.column("P_tot_y_10"),
        vec![Some(5.0), Some(3.0), Some(8.0)]
    );
}

#[test]
fn missing_atmospheric_reading_skips_correction() {
    let input = table(&[-5.0, -3.0, -2.0], &[-1.0, -1.0, -1.0], None);
    let (corrected, report) =
        apply_sign_correction(&input, &schema(), SignCorrectionPolicy::AllNegative);

    assert!(!report.applied);
    assert_eq!(report.atmospheric_offset, None);
    assert_eq!(corrected, input);
}

#[test]
fn offset_comes_from_the_first_sorted_row() {
    let input = MeasurementTable::from_rows(vec![
        MeasurementRow::new(20.0)
            .with_value("P_tot_y_10", -1.0)
            .with_value("P_atm (Pa)", 50.0),
        MeasurementRow::new(0.0)
            .with_value("P_tot_y_10", -2.0)
            .with_value("P_atm (Pa)", 30.0),
    ]);
    let (corrected, _) =
        apply_sign_correction(&input, &schema(), SignCorrectionPolicy::AllNegative);

    assert_eq!(corrected.column("P_tot_y_10"), vec![Some(28.0), Some(29.0)]);
}

#[test]
fn zero_threshold_does_not_touch_positive_readings() {
    let input = table(&[5.0, 3.0], &[1.0, 2.0], Some(10.0));
    let policy = SignCorrectionPolicy::Threshold {
        min_negative_fraction: 0.0,
    };
    let (corrected, report) = apply_sign_correction(&input, &schema(), policy);

    assert!(!report.applied);
    assert_eq!(report.negative_rows, 0);
    assert_eq!(report.corrected_cells, 0);
    assert_eq!(report.atmospheric_offset, None);
    assert_eq!(corrected, input);
}
