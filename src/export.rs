//! Workbook export: one sheet per report, holding its table and charts.
//!
//! The workbook is built in memory and written once by
//! [`WorkbookExporter::finish`]. Saving goes through a temp file that is
//! renamed on success, so a failure at any point leaves nothing at the output
//! path.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Chart, ChartAxisLabelPosition, ChartType, Workbook, Worksheet};
use tracing::{debug, info, warn};

use crate::chart::{ChartKind, ChartLayout, ChartSpec};
use crate::config::LABEL_HEADER;
use crate::error::{CostReportError, Result};
use crate::report::Report;

const MAX_SHEET_NAME_CHARS: usize = 31;
const INVALID_SHEET_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

// Renderer's default chart size in pixels, before scaling.
const DEFAULT_CHART_WIDTH: f64 = 480.0;
const DEFAULT_CHART_HEIGHT: f64 = 288.0;

/// Check that `title` can be used as a sheet name.
pub fn validate_sheet_name(title: &str) -> Result<()> {
    let invalid = |reason: &str| -> Result<()> {
        Err(CostReportError::InvalidSheetName(format!("{:?}: {}", title, reason)))
    };
    if title.trim().is_empty() {
        return invalid("must not be blank");
    }
    if title.chars().count() > MAX_SHEET_NAME_CHARS {
        return invalid("longer than 31 characters");
    }
    if title.contains(INVALID_SHEET_CHARS) {
        return invalid("contains one of [ ] : * ? / \\");
    }
    if title.starts_with('\'') || title.ends_with('\'') {
        return invalid("starts or ends with an apostrophe");
    }
    Ok(())
}

/// Check every title up front so a bad batch fails before anything is written.
/// Sheet names compare case-insensitively.
pub fn validate_titles(reports: &[Report]) -> Result<()> {
    let mut seen = HashSet::new();
    for report in reports {
        validate_sheet_name(&report.title)?;
        if !seen.insert(report.title.to_lowercase()) {
            return Err(CostReportError::DuplicateTitle(report.title.clone()));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// WorkbookExporter
// ---------------------------------------------------------------------------

/// Owns the workbook for a whole batch of reports.
pub struct WorkbookExporter {
    workbook: Workbook,
    path: PathBuf,
    layout: ChartLayout,
    titles: HashSet<String>,
}

impl WorkbookExporter {
    pub fn new<P: AsRef<Path>>(path: P, layout: ChartLayout) -> Self {
        Self {
            workbook: Workbook::new(),
            path: path.as_ref().to_path_buf(),
            layout,
            titles: HashSet::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Add one sheet holding `report`'s table and its planned charts.
    pub fn add_report(&mut self, report: &Report) -> Result<()> {
        validate_sheet_name(&report.title)?;
        if !self.titles.insert(report.title.to_lowercase()) {
            return Err(CostReportError::DuplicateTitle(report.title.clone()));
        }
        info!(" - adding {}", report.title);

        let specs = report.chart_specs(&self.layout);
        if specs.is_empty() && !report.charts.is_empty() {
            warn!(title = %report.title, "no data to chart; charts skipped");
        }

        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(&report.title)?;
        write_table(worksheet, report)?;

        for spec in &specs {
            let chart = render_chart(&report.title, spec);
            worksheet.insert_chart(spec.anchor.row, spec.anchor.col, &chart)?;
            debug!(title = %report.title, kind = ?spec.kind, row = spec.anchor.row, "inserted chart");
        }
        Ok(())
    }

    /// Save the workbook and return its path.
    pub fn finish(mut self) -> Result<PathBuf> {
        let tmp_path = temp_path_for(&self.path);

        let result = (|| -> Result<()> {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            self.workbook.save(&tmp_path)?;
            fs::rename(&tmp_path, &self.path)?;
            Ok(())
        })();

        if result.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        result?;
        Ok(self.path)
    }
}

/// Write every report to `path` as one workbook.
///
/// The layout and titles are validated before any sheet is built; any failure aborts the
/// whole batch and leaves no file behind.
pub fn export_reports<P: AsRef<Path>>(reports: &[Report], path: P, layout: &ChartLayout) -> Result<PathBuf> {
    layout.validate()?;
    validate_titles(reports)?;

    let mut exporter = WorkbookExporter::new(path, *layout);
    info!("Creating {}", exporter.path().display());
    for report in reports {
        exporter.add_report(report)?;
    }
    exporter.finish()
}

/// Sibling of `path` with `.tmp` appended to the full file name.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_table(worksheet: &mut Worksheet, report: &Report) -> Result<()> {
    let table = &report.table;
    worksheet.write_string(0, 0, LABEL_HEADER)?;
    for (c, date) in table.dates().iter().enumerate() {
        worksheet.write_string(0, c as u16 + 1, date.format("%Y-%m-%d").to_string())?;
    }
    for (r, label) in table.labels().iter().enumerate() {
        let row = r as u32 + 1;
        worksheet.write_string(row, 0, label)?;
        if let Some(values) = table.row(r) {
            for (c, value) in values.iter().enumerate() {
                worksheet.write_number(row, c as u16 + 1, *value)?;
            }
        }
    }
    Ok(())
}

fn render_chart(sheet: &str, spec: &ChartSpec) -> Chart {
    let mut chart = match spec.kind {
        ChartKind::Timeline => Chart::new(ChartType::ColumnStacked),
        ChartKind::TimelineByCategory => Chart::new(ChartType::Line),
        ChartKind::PieChartOfLatest => Chart::new(ChartType::Pie),
    };

    for series in &spec.series {
        let s = chart.add_series();
        if let Some(name) = series.name {
            s.set_name((sheet, name.row, name.col));
        }
        let (c, v) = (series.categories, series.values);
        s.set_categories((sheet, c.first_row, c.first_col, c.last_row, c.last_col))
            .set_values((sheet, v.first_row, v.first_col, v.last_row, v.last_col));
    }

    if spec.kind != ChartKind::PieChartOfLatest {
        chart.x_axis().set_label_position(ChartAxisLabelPosition::Low);
        chart.y_axis().set_label_position(ChartAxisLabelPosition::Low);
    }
    chart
        .set_width((DEFAULT_CHART_WIDTH * spec.scale).round() as u32)
        .set_height((DEFAULT_CHART_HEIGHT * spec.scale).round() as u32);
    chart
}
