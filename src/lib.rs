//! Monthly cost reports for Rust.
//!
//! Pulls a window of monthly cost records from a [`CostSource`], folds them
//! into a date-indexed table, optionally turns the table into month-over-month
//! changes, pivots it so the largest current contributors come first, and
//! writes every report to one workbook with its charts stacked beside the
//! table.
//!
//! # Quick start
//!
//! ```no_run
//! use cost_report::{default_reports, CostReporter, HttpCostSource};
//!
//! let source = HttpCostSource::new("https://ce.us-east-1.amazonaws.com/")
//!     .header("Authorization", "...");
//! let mut reporter = CostReporter::builder().source(source).build().unwrap();
//!
//! let path = reporter.run(&default_reports()).unwrap();
//! println!("wrote {}", path.display());
//! ```

pub mod aggregate;
#[cfg(feature = "async")]
pub mod async_client;
pub mod chart;
pub mod config;
pub mod delta;
pub mod error;
pub mod export;
pub mod label;
pub mod models;
pub mod pivot;
pub mod query;
pub mod report;
pub mod source;
pub mod table;

pub use aggregate::aggregate;
#[cfg(feature = "async")]
pub use async_client::AsyncCostReporter;
pub use chart::{plan_charts, ChartKind, ChartLayout, ChartSpec};
pub use config::ReportConfig;
pub use delta::{deltas, DataType};
pub use error::{CostReportError, Result};
pub use export::{export_reports, WorkbookExporter};
pub use label::{strip_prefix, Identity, LabelFormatter, StripPrefix};
pub use models::{PeriodAmounts, PeriodRecord};
pub use pivot::pivot;
pub use query::{CostQuery, GroupBy, GroupKind};
pub use report::{build_report, default_reports, Report, ReportDefinition};
pub use source::{CostSource, HttpCostSource, RecordedCostSource};
pub use table::{DatedTable, PivotTable};

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

// ---------------------------------------------------------------------------
// CostReporterBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`CostReporter`].
///
/// Use [`CostReporter::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](CostReporterBuilder::build).
#[derive(Default)]
pub struct CostReporterBuilder {
    config: ReportConfig,
    today: Option<NaiveDate>,
    source: Option<Box<dyn CostSource + Send>>,
}

impl CostReporterBuilder {
    /// Replace the whole configuration.
    pub fn config(mut self, config: ReportConfig) -> Self {
        self.config = config;
        self
    }

    /// Number of whole months before the current one to report on.
    ///
    /// Defaults to 6.
    pub fn lookback_months(mut self, months: u32) -> Self {
        self.config.lookback_months = months;
        self
    }

    /// Cost metric to request. Defaults to `UnblendedCost`.
    pub fn metric(mut self, metric: &str) -> Self {
        self.config.metric = metric.to_string();
        self
    }

    /// Where the workbook is written.
    pub fn output_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.output_path = path.as_ref().to_path_buf();
        self
    }

    /// Where charts are anchored on each sheet.
    ///
    /// Defaults to [`ChartLayout::default()`]: column `O`, starting at row 2.
    pub fn layout(mut self, layout: ChartLayout) -> Self {
        self.config.layout = layout;
        self
    }

    /// Pin the date the reporting window is computed from.
    ///
    /// Defaults to the local date at build time.
    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// The cost data source every report is pulled from. Required.
    pub fn source<S: CostSource + Send + 'static>(mut self, source: S) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Validate the configuration and build the reporter.
    ///
    /// Fails with [`CostReportError::InvalidArgument`] when no source was set
    /// or the configuration is out of range.
    pub fn build(self) -> Result<CostReporter> {
        self.config.validate()?;
        let source = self.source.ok_or_else(|| {
            CostReportError::InvalidArgument("a cost source is required".to_string())
        })?;
        Ok(CostReporter {
            config: self.config,
            today: self
                .today
                .unwrap_or_else(|| chrono::Local::now().date_naive()),
            source,
        })
    }
}

// ---------------------------------------------------------------------------
// CostReporter
// ---------------------------------------------------------------------------

/// Runs report definitions against one cost source and exports the results.
///
/// Reports are built strictly one after another; nothing is shared between
/// them except the configuration.
pub struct CostReporter {
    config: ReportConfig,
    today: NaiveDate,
    source: Box<dyn CostSource + Send>,
}

impl CostReporter {
    /// Create a new builder for configuring the reporter.
    pub fn builder() -> CostReporterBuilder {
        CostReporterBuilder::default()
    }

    /// The configuration every report is built with.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// The date reporting windows are computed from.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// The query issued for `definition`.
    pub fn query_for(&self, definition: &ReportDefinition) -> Result<CostQuery> {
        let mut query = CostQuery::monthly(self.today, self.config.lookback_months, &self.config.metric)?
            .excluding(&self.config.excluded_record_types);
        if let Some(group_by) = &definition.group_by {
            query = query.group_by(group_by.clone());
        }
        Ok(query)
    }

    /// Pull all pages for `definition` and build its report.
    pub fn create_report(&mut self, definition: &ReportDefinition) -> Result<Report> {
        let query = self.query_for(definition)?;
        info!(
            title = %definition.title,
            start = %query.time_period.start,
            end = %query.time_period.end,
            "querying costs"
        );
        build_report(definition, source::records(&mut self.source, &query))
    }

    /// Build every definition in order, stopping at the first failure.
    pub fn create_reports(&mut self, definitions: &[ReportDefinition]) -> Result<Vec<Report>> {
        definitions
            .iter()
            .map(|definition| self.create_report(definition))
            .collect()
    }

    /// Write `reports` to the configured output path.
    pub fn export(&self, reports: &[Report]) -> Result<PathBuf> {
        export_reports(reports, &self.config.output_path, &self.config.layout)
    }

    /// Build and export every definition; returns the written path.
    pub fn run(&mut self, definitions: &[ReportDefinition]) -> Result<PathBuf> {
        let reports = self.create_reports(definitions)?;
        self.export(&reports)
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for CostReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CostReporter(today={}, lookback_months={}, metric={}, output={})",
            self.today,
            self.config.lookback_months,
            self.config.metric,
            self.config.output_path.display()
        )
    }
}
