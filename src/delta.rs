//! Period-over-period differences.

use serde::{Deserialize, Serialize};

use crate::table::DatedTable;

/// Whether a report shows absolute amounts or period-over-period changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    #[default]
    Total,
    Delta,
}

impl DataType {
    /// Apply this mode to an aggregated table.
    pub fn apply(self, table: DatedTable) -> DatedTable {
        match self {
            DataType::Total => table,
            DataType::Delta => deltas(table),
        }
    }
}

/// Replace every value with its difference from the previous date's value in
/// the same column.
///
/// The first date has no predecessor, so all of its values become `0.0`.
/// Dates are taken in table order, which is ascending when records arrive in
/// chronological order.
pub fn deltas(table: DatedTable) -> DatedTable {
    let (dates, columns, cells, reference_date) = table.into_parts();

    let mut out = Vec::with_capacity(cells.len());
    let mut previous: Option<&Vec<f64>> = None;
    for row in &cells {
        let delta = match previous {
            None => vec![0.0; row.len()],
            Some(prev) => row.iter().zip(prev).map(|(cur, prev)| cur - prev).collect(),
        };
        out.push(delta);
        previous = Some(row);
    }

    DatedTable::from_rows(dates, columns, out, reference_date)
}
