//! Pivot/sort tests.

mod common;

use common::{month, monthly_totals, ok_records};
use cost_report::{aggregate, deltas, pivot, Identity, PeriodRecord};

fn three_groups() -> Vec<PeriodRecord> {
    vec![
        PeriodRecord::groups(month(1), vec![("A", 50.0), ("B", 10.0), ("C", 30.0)]),
        PeriodRecord::groups(month(2), vec![("A", 5.0), ("B", 40.0), ("C", 20.0)]),
    ]
}

#[test]
fn transposes_labels_into_rows_and_dates_into_columns() {
    let table = aggregate(ok_records(three_groups()), &Identity).unwrap();
    let (rows, cols) = (table.row_count(), table.column_count());

    let pivoted = pivot(table);
    assert_eq!(pivoted.row_count(), cols);
    assert_eq!(pivoted.column_count(), rows);
    assert_eq!(pivoted.dates(), &[month(1), month(2)]);
}

#[test]
fn rows_sorted_by_most_recent_period_descending() {
    let pivoted = pivot(aggregate(ok_records(three_groups()), &Identity).unwrap());
    assert_eq!(pivoted.labels(), &["B", "C", "A"]);

    let latest = pivoted.column(1).unwrap();
    assert_eq!(latest, vec![40.0, 20.0, 5.0]);
    assert!(latest.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn values_follow_their_labels() {
    let pivoted = pivot(aggregate(ok_records(three_groups()), &Identity).unwrap());
    assert_eq!(pivoted.get("A", month(1)), Some(50.0));
    assert_eq!(pivoted.get("B", month(2)), Some(40.0));
    assert_eq!(pivoted.row(2).unwrap(), &[50.0, 5.0]);
}

#[test]
fn ties_keep_first_seen_order() {
    let records = vec![PeriodRecord::groups(
        month(1),
        vec![("x", 1.0), ("y", 2.0), ("z", 1.0), ("w", 2.0)],
    )];
    let pivoted = pivot(aggregate(ok_records(records), &Identity).unwrap());
    assert_eq!(pivoted.labels(), &["y", "w", "x", "z"]);
}

#[test]
fn negative_deltas_sort_below_positive() {
    let records = vec![
        PeriodRecord::groups(month(1), vec![("up", 10.0), ("down", 50.0), ("flat", 5.0)]),
        PeriodRecord::groups(month(2), vec![("up", 25.0), ("down", 20.0), ("flat", 5.0)]),
    ];
    let pivoted = pivot(deltas(aggregate(ok_records(records), &Identity).unwrap()));
    assert_eq!(pivoted.labels(), &["up", "flat", "down"]);
    assert_eq!(pivoted.column(1).unwrap(), vec![15.0, 0.0, -30.0]);
}

#[test]
fn reference_column_is_last_aggregated_date() {
    let pivoted = pivot(aggregate(ok_records(monthly_totals(&[1.0, 2.0, 3.0])), &Identity).unwrap());
    assert_eq!(pivoted.reference_date(), Some(month(3)));
    assert_eq!(pivoted.reference_column(), Some(2));
}

#[test]
fn empty_table_pivots_to_empty() {
    let pivoted = pivot(aggregate(Vec::new(), &Identity).unwrap());
    assert!(pivoted.is_empty());
    assert_eq!(pivoted.reference_column(), None);
}
