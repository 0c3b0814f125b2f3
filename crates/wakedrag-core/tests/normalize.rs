use wakedrag_core::normalize::{coerce_value, normalize};
use wakedrag_core::{CalculationError, MeasurementTable, TableSchema};
use wakedrag_parser::{RawRow, RawTable, RawValue};

fn row(z: &str, wake: &str) -> RawRow {
    RawRow::from_pairs([("z (mm)", z), ("P_tot_y_10", wake)])
}

fn schema_for(raw: &RawTable) -> TableSchema {
    TableSchema::discover(&raw.columns, 10.0).unwrap()
}

#[test]
fn rows_are_sorted_by_position() {
    let raw = RawTable::from_rows(vec![row("20", "3"), row("0", "1"), row("10", "2")]);
    let table = normalize(&raw, &schema_for(&raw)).unwrap();

    assert_eq!(table.positions(), vec![0.0, 10.0, 20.0]);
    assert_eq!(
        table.column("P_tot_y_10"),
        vec![Some(1.0), Some(2.0), Some(3.0)]
    );
}

#[test]
fn equal_positions_keep_input_order() {
    let raw = RawTable::from_rows(vec![row("10", "1"), row("0", "0"), row("10", "2")]);
    let table = normalize(&raw, &schema_for(&raw)).unwrap();

    assert_eq!(
        table.column("P_tot_y_10"),
        vec![Some(0.0), Some(1.0), Some(2.0)]
    );
}

#[test]
fn sorting_is_idempotent() {
    let raw = RawTable::from_rows(vec![row("5", "1"), row("-5", "2"), row("0", "3")]);
    let table = normalize(&raw, &schema_for(&raw)).unwrap();
    let resorted = MeasurementTable::from_rows(table.rows().to_vec());

    assert_eq!(resorted, table);
}

#[test]
fn input_permutation_does_not_change_the_result() {
    let rows = vec![row("0", "1"), row("2.5", "2"), row("5", "3"), row("7.5", "4")];
    let forward = RawTable::from_rows(rows.clone());
    let mut reversed_rows = rows;
    reversed_rows.reverse();
    let reversed = RawTable::from_rows(reversed_rows);

    let a = normalize(&forward, &schema_for(&forward)).unwrap();
    let b = normalize(&reversed, &schema_for(&reversed)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn rows_without_usable_position_are_dropped() {
    let raw = RawTable::from_rows(vec![
        row("0", "1"),
        row("", "2"),
        row("   ", "3"),
        row("n/a", "4"),
        RawRow::from_pairs([("P_tot_y_10", "5")]),
        row("10", "6"),
    ]);
    let table = normalize(&raw, &schema_for(&raw)).unwrap();

    assert_eq!(table.positions(), vec![0.0, 10.0]);
}

#[test]
fn non_numeric_cells_are_left_out() {
    let raw = RawTable::from_rows(vec![row("0", "broken"), row("10", "2")]);
    let table = normalize(&raw, &schema_for(&raw)).unwrap();

    assert_eq!(table.rows()[0].value("P_tot_y_10"), None);
    assert_eq!(table.rows()[1].value("P_tot_y_10"), Some(2.0));
}

#[test]
fn decimal_commas_are_accepted() {
    assert_eq!(coerce_value(&RawValue::from("12,5")), Some(12.5));
    assert_eq!(coerce_value(&RawValue::from("-310,25")), Some(-310.25));
    assert_eq!(coerce_value(&RawValue::from("1,000.5")), None);
    assert_eq!(coerce_value(&RawValue::from("NaN")), None);
    assert_eq!(coerce_value(&RawValue::Empty), None);
    assert_eq!(coerce_value(&RawValue::Number(4.0)), Some(4.0));
}

#[test]
fn fewer_than_two_rows_is_insufficient() {
    let raw = RawTable::from_rows(vec![row("0", "1"), row("", "2")]);
    let err = normalize(&raw, &schema_for(&raw)).unwrap_err();
    assert_eq!(err, CalculationError::InsufficientData { rows: 1 });
}

#[test]
fn missing_position_column_leaves_no_rows() {
    let raw = RawTable::from_rows(vec![
        RawRow::from_pairs([("P_tot_y_10", "1")]),
        RawRow::from_pairs([("P_tot_y_10", "2")]),
    ]);
    let err = normalize(&raw, &schema_for(&raw)).unwrap_err();
    assert_eq!(err, CalculationError::InsufficientData { rows: 0 });
}

#[test]
fn schema_without_position_rejects_every_row() {
    let headerless = TableSchema::discover(&["P_tot_y_10".to_string()], 10.0).unwrap();
    assert!(!headerless.has_position);

    let raw = RawTable::from_rows(vec![row("0", "1"), row("10", "2"), row("20", "3")]);
    let err = normalize(&raw, &headerless).unwrap_err();
    assert_eq!(err, CalculationError::InsufficientData { rows: 0 });
}
