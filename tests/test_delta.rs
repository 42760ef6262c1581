//! Delta calculator tests.

mod common;

use common::{month, monthly_totals, ok_records};
use cost_report::{aggregate, deltas, DataType, Identity, PeriodRecord};

#[test]
fn totals_become_month_over_month_changes() {
    let table = aggregate(ok_records(monthly_totals(&[100.0, 140.0, 90.0])), &Identity).unwrap();
    let delta = deltas(table);
    assert_eq!(delta.column_values("Total").unwrap(), vec![0.0, 40.0, -50.0]);
}

#[test]
fn first_period_is_zero_filled() {
    let records = vec![
        PeriodRecord::groups(month(1), vec![("A", 12.0), ("B", 30.0)]),
        PeriodRecord::groups(month(2), vec![("A", 15.0), ("B", 10.0)]),
    ];
    let delta = deltas(aggregate(ok_records(records), &Identity).unwrap());
    assert_eq!(delta.row(0).unwrap(), &[0.0, 0.0]);
    assert_eq!(delta.row(1).unwrap(), &[3.0, -20.0]);
}

#[test]
fn filled_zeroes_take_part_in_differences() {
    let records = vec![
        PeriodRecord::groups(month(1), vec![("A", 5.0), ("B", 7.0)]),
        PeriodRecord::groups(month(2), vec![("A", 6.0)]),
        PeriodRecord::groups(month(3), vec![("A", 6.0), ("B", 2.0)]),
    ];
    let delta = deltas(aggregate(ok_records(records), &Identity).unwrap());
    assert_eq!(delta.column_values("B").unwrap(), vec![0.0, -7.0, 2.0]);
    assert_eq!(delta.column_values("A").unwrap(), vec![0.0, 1.0, 0.0]);
}

#[test]
fn delta_matches_definition_for_every_cell() {
    let amounts = [3.5, 9.25, 1.0, 1.0, 20.0];
    let absolute = aggregate(ok_records(monthly_totals(&amounts)), &Identity).unwrap();
    let delta = deltas(absolute.clone());

    let abs = absolute.column_values("Total").unwrap();
    let del = delta.column_values("Total").unwrap();
    assert_eq!(del[0], 0.0);
    for d in 1..abs.len() {
        assert_eq!(del[d], abs[d] - abs[d - 1]);
    }
}

#[test]
fn shape_and_reference_date_are_preserved() {
    let absolute = aggregate(ok_records(monthly_totals(&[1.0, 2.0])), &Identity).unwrap();
    let delta = deltas(absolute.clone());
    assert_eq!(delta.dates(), absolute.dates());
    assert_eq!(delta.columns(), absolute.columns());
    assert_eq!(delta.reference_date(), absolute.reference_date());
}

#[test]
fn single_period_is_all_zero() {
    let delta = deltas(aggregate(ok_records(monthly_totals(&[55.0])), &Identity).unwrap());
    assert_eq!(delta.column_values("Total").unwrap(), vec![0.0]);
}

#[test]
fn data_type_total_keeps_absolute_values() {
    let absolute = aggregate(ok_records(monthly_totals(&[100.0, 140.0])), &Identity).unwrap();
    assert_eq!(DataType::Total.apply(absolute.clone()), absolute);
    assert_eq!(
        DataType::Delta.apply(absolute).column_values("Total").unwrap(),
        vec![0.0, 40.0]
    );
}
