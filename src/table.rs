//! Dense cost tables in their two orientations.
//!
//! [`DatedTable`] is indexed by period start date (one row per date, one column
//! per label) and is what aggregation and delta computation work on.
//! [`PivotTable`] is the transposed presentation form (one row per label, one
//! column per date) that gets exported and charted.
//!
//! Both store every cell explicitly, so a column observed on any date exists on
//! all dates.

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// DatedTable
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatedTable {
    dates: Vec<NaiveDate>,
    columns: Vec<String>,
    cells: Vec<Vec<f64>>,
    reference_date: Option<NaiveDate>,
}

impl DatedTable {
    /// Assemble a table from dense rows. Rows shorter than `columns` are
    /// padded with `0.0`; longer rows are truncated.
    pub fn from_rows(
        dates: Vec<NaiveDate>,
        columns: Vec<String>,
        mut cells: Vec<Vec<f64>>,
        reference_date: Option<NaiveDate>,
    ) -> Self {
        cells.resize_with(dates.len(), Vec::new);
        for row in &mut cells {
            row.resize(columns.len(), 0.0);
        }
        Self {
            dates,
            columns,
            cells,
            reference_date,
        }
    }

    /// Dates in the order they were first aggregated.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Column labels in the order they were first observed.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Date of the last record consumed while building the table.
    pub fn reference_date(&self) -> Option<NaiveDate> {
        self.reference_date
    }

    pub fn row_count(&self) -> usize {
        self.dates.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// All values for the row at `index`, in column order.
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.cells.get(index).map(Vec::as_slice)
    }

    pub fn get(&self, date: NaiveDate, column: &str) -> Option<f64> {
        let r = self.dates.iter().position(|d| *d == date)?;
        let c = self.columns.iter().position(|l| l == column)?;
        Some(self.cells[r][c])
    }

    /// Every value of `column`, in date order.
    pub fn column_values(&self, column: &str) -> Option<Vec<f64>> {
        let c = self.columns.iter().position(|l| l == column)?;
        Some(self.cells.iter().map(|row| row[c]).collect())
    }

    pub(crate) fn into_parts(self) -> (Vec<NaiveDate>, Vec<String>, Vec<Vec<f64>>, Option<NaiveDate>) {
        (self.dates, self.columns, self.cells, self.reference_date)
    }
}

// ---------------------------------------------------------------------------
// PivotTable
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PivotTable {
    labels: Vec<String>,
    dates: Vec<NaiveDate>,
    cells: Vec<Vec<f64>>,
    reference_date: Option<NaiveDate>,
}

impl PivotTable {
    pub(crate) fn new(
        labels: Vec<String>,
        dates: Vec<NaiveDate>,
        cells: Vec<Vec<f64>>,
        reference_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            labels,
            dates,
            cells,
            reference_date,
        }
    }

    /// Row labels, largest reference-period value first.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Date columns, in aggregation order.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn reference_date(&self) -> Option<NaiveDate> {
        self.reference_date
    }

    /// Position of the reference date among the date columns.
    pub fn reference_column(&self) -> Option<usize> {
        let date = self.reference_date?;
        self.dates.iter().position(|d| *d == date)
    }

    pub fn row_count(&self) -> usize {
        self.labels.len()
    }

    pub fn column_count(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() || self.dates.is_empty()
    }

    /// Values of the row at `index`, one per date column.
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.cells.get(index).map(Vec::as_slice)
    }

    /// Values of the date column at `index`, one per label row.
    pub fn column(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.dates.len() {
            return None;
        }
        Some(self.cells.iter().map(|row| row[index]).collect())
    }

    pub fn get(&self, label: &str, date: NaiveDate) -> Option<f64> {
        let r = self.labels.iter().position(|l| l == label)?;
        let c = self.dates.iter().position(|d| *d == date)?;
        Some(self.cells[r][c])
    }
}
