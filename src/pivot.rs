//! Transposing into presentation order.

use crate::table::{DatedTable, PivotTable};

/// Transpose `table` so labels become rows and dates become columns, then
/// order rows by descending value in the reference-date column.
///
/// The reference date is the date of the last record aggregated, which is the
/// most recent period when records arrive in ascending order. The sort is
/// stable: labels with equal reference values keep their first-seen order.
/// A table with no reference date keeps its column order.
pub fn pivot(table: DatedTable) -> PivotTable {
    let (dates, columns, cells, reference_date) = table.into_parts();

    let mut rows: Vec<(String, Vec<f64>)> = columns
        .into_iter()
        .enumerate()
        .map(|(c, label)| (label, cells.iter().map(|row| row[c]).collect()))
        .collect();

    if let Some(r) = reference_date.and_then(|date| dates.iter().position(|d| *d == date)) {
        rows.sort_by(|a, b| b.1[r].total_cmp(&a.1[r]));
    }

    let (labels, cells) = rows.into_iter().unzip();
    PivotTable::new(labels, dates, cells, reference_date)
}
