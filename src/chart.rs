//! Chart planning: from a report's requested chart kinds to concrete
//! placements on its sheet.
//!
//! Every report sheet has the same shape: row 0 holds a header cell and the
//! date columns, column 0 holds the labels, and the amounts start at (1, 1).
//! Charts are stacked in a single column of the sheet, each one
//! `chart_height_rows` below the previous, in the order they were requested.
//! Nothing here touches the rendering engine; the exporter turns each
//! [`ChartSpec`] into a real chart.

use serde::{Deserialize, Serialize};

use crate::error::{CostReportError, Result};
use crate::table::PivotTable;

/// Last zero-based row index a sheet can hold.
pub const MAX_SHEET_ROW: u32 = 1_048_575;
/// Last zero-based column index a sheet can hold.
pub const MAX_SHEET_COLUMN: u16 = 16_383;

/// The chart visualizations a report can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartKind {
    /// Stacked columns, one series per label, one category per date.
    Timeline,
    /// Unstacked lines over the same ranges as [`ChartKind::Timeline`].
    TimelineByCategory,
    /// One series of every label's amount in the most recent date column.
    PieChartOfLatest,
}

/// Where charts go on a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartLayout {
    /// Zero-based column every chart is anchored in (14 = column `O`).
    pub anchor_column: u16,
    /// Zero-based row of the first chart's anchor.
    pub first_row: u32,
    /// Vertical distance, in rows, between consecutive chart anchors.
    pub chart_height_rows: u32,
    /// Size multiplier applied to the renderer's default chart size.
    pub scale: f64,
}

impl ChartLayout {
    /// Reject layouts whose first chart cannot fit on a sheet.
    pub fn validate(&self) -> Result<()> {
        if self.chart_height_rows == 0 {
            return Err(CostReportError::InvalidArgument(
                "chart_height_rows must be at least 1".to_string(),
            ));
        }
        if self.anchor_column > MAX_SHEET_COLUMN {
            return Err(CostReportError::InvalidArgument(format!(
                "anchor_column {} is beyond the last sheet column {}",
                self.anchor_column, MAX_SHEET_COLUMN
            )));
        }
        let fits = self
            .first_row
            .checked_add(self.chart_height_rows)
            .is_some_and(|end| end <= MAX_SHEET_ROW);
        if !fits {
            return Err(CostReportError::InvalidArgument(format!(
                "first_row {} plus chart_height_rows {} exceeds the last sheet row {}",
                self.first_row, self.chart_height_rows, MAX_SHEET_ROW
            )));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(CostReportError::InvalidArgument(format!(
                "scale must be a positive number, got {}",
                self.scale
            )));
        }
        Ok(())
    }
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            anchor_column: 14,
            first_row: 1,
            chart_height_rows: 32,
            scale: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub row: u32,
    pub col: u16,
}

/// An inclusive rectangle of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub first_row: u32,
    pub first_col: u16,
    pub last_row: u32,
    pub last_col: u16,
}

impl CellRange {
    pub fn row_span(first_col: u16, last_col: u16, row: u32) -> Self {
        Self {
            first_row: row,
            first_col,
            last_row: row,
            last_col,
        }
    }

    pub fn column_span(first_row: u32, last_row: u32, col: u16) -> Self {
        Self {
            first_row,
            first_col: col,
            last_row,
            last_col: col,
        }
    }

    pub fn cell_count(&self) -> usize {
        (self.last_row - self.first_row + 1) as usize * (self.last_col - self.first_col + 1) as usize
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSpec {
    /// Cell holding the series name; `None` for single-series charts.
    pub name: Option<CellRef>,
    pub categories: CellRange,
    pub values: CellRange,
}

/// One chart placement: what to draw, from which cells, and where.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub series: Vec<SeriesSpec>,
    pub anchor: CellRef,
    pub scale: f64,
}

/// Plan one placement per requested kind for a sheet holding `table`.
///
/// Returns nothing for an empty table: there is no range a chart could read.
pub fn plan_charts(table: &PivotTable, kinds: &[ChartKind], layout: &ChartLayout) -> Vec<ChartSpec> {
    if table.is_empty() {
        return Vec::new();
    }

    let last_row = table.row_count() as u32;
    let last_col = table.column_count() as u16;

    kinds
        .iter()
        .enumerate()
        .map(|(i, &kind)| {
            let series = match kind {
                ChartKind::Timeline | ChartKind::TimelineByCategory => {
                    timeline_series(last_row, last_col)
                }
                ChartKind::PieChartOfLatest => vec![SeriesSpec {
                    name: None,
                    categories: CellRange::column_span(1, last_row, 0),
                    values: CellRange::column_span(1, last_row, last_col),
                }],
            };
            ChartSpec {
                kind,
                series,
                anchor: CellRef {
                    row: anchor_row(layout, i),
                    col: layout.anchor_column,
                },
                scale: layout.scale,
            }
        })
        .collect()
}

// Saturates instead of wrapping; an anchor past the sheet is rejected on export.
fn anchor_row(layout: &ChartLayout, index: usize) -> u32 {
    let offset = u32::try_from(index)
        .unwrap_or(u32::MAX)
        .saturating_mul(layout.chart_height_rows);
    layout.first_row.saturating_add(offset)
}

fn timeline_series(last_row: u32, last_col: u16) -> Vec<SeriesSpec> {
    (1..=last_row)
        .map(|row| SeriesSpec {
            name: Some(CellRef { row, col: 0 }),
            categories: CellRange::row_span(1, last_col, 0),
            values: CellRange::row_span(1, last_col, row),
        })
        .collect()
}
