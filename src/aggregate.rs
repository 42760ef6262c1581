//! Folding period records into a date-indexed table.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::config::TOTAL_COLUMN;
use crate::error::Result;
use crate::label::LabelFormatter;
use crate::models::{PeriodAmounts, PeriodRecord};
use crate::table::DatedTable;

/// Consume `records` and build a [`DatedTable`].
///
/// Each record creates (or updates) the row for its start date. Ungrouped
/// records write the `Total` column; grouped records write one column per
/// formatted key, last write winning when two keys format to the same label.
/// Dates and columns keep the order in which they were first seen, and every
/// (date, column) pair absent from the input is filled with `0.0`.
///
/// The first error yielded by `records` aborts aggregation and is returned.
pub fn aggregate<I>(records: I, formatter: &dyn LabelFormatter) -> Result<DatedTable>
where
    I: IntoIterator<Item = Result<PeriodRecord>>,
{
    let mut dates: Vec<NaiveDate> = Vec::new();
    let mut date_index: HashMap<NaiveDate, usize> = HashMap::new();
    let mut columns: Vec<String> = Vec::new();
    let mut column_index: HashMap<String, usize> = HashMap::new();
    let mut sparse: Vec<HashMap<usize, f64>> = Vec::new();
    let mut last_date = None;

    for record in records {
        let record = record?;
        let row = *date_index.entry(record.start).or_insert_with(|| {
            dates.push(record.start);
            sparse.push(HashMap::new());
            dates.len() - 1
        });
        last_date = Some(record.start);

        match record.amounts {
            PeriodAmounts::Total(amount) => {
                let col = column_slot(&mut columns, &mut column_index, TOTAL_COLUMN);
                sparse[row].insert(col, amount);
            }
            PeriodAmounts::Groups(groups) => {
                for (key, amount) in groups {
                    let label = formatter.format(&key);
                    let col = column_slot(&mut columns, &mut column_index, &label);
                    sparse[row].insert(col, amount);
                }
            }
        }
    }

    let cells = sparse
        .into_iter()
        .map(|values| {
            let mut row = vec![0.0; columns.len()];
            for (col, amount) in values {
                row[col] = amount;
            }
            row
        })
        .collect();

    debug!(
        dates = dates.len(),
        columns = columns.len(),
        "aggregated cost records"
    );
    Ok(DatedTable::from_rows(dates, columns, cells, last_date))
}

fn column_slot(columns: &mut Vec<String>, index: &mut HashMap<String, usize>, label: &str) -> usize {
    if let Some(&col) = index.get(label) {
        return col;
    }
    columns.push(label.to_string());
    index.insert(label.to_string(), columns.len() - 1);
    columns.len() - 1
}
