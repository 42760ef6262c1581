//! Report definitions and the aggregate → delta → pivot pipeline.

use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use crate::aggregate::aggregate;
use crate::chart::{plan_charts, ChartKind, ChartLayout, ChartSpec};
use crate::delta::DataType;
use crate::error::Result;
use crate::label::{Identity, LabelFormatter, StripPrefix};
use crate::models::PeriodRecord;
use crate::pivot::pivot;
use crate::query::GroupBy;
use crate::table::PivotTable;

// ---------------------------------------------------------------------------
// ReportDefinition
// ---------------------------------------------------------------------------

/// What to pull and how to present it, for one report.
///
/// Every definition starts from fresh defaults: no grouping, absolute totals,
/// a single [`ChartKind::Timeline`], and the [`Identity`] formatter.
#[derive(Clone)]
pub struct ReportDefinition {
    pub title: String,
    pub group_by: Option<GroupBy>,
    pub data_type: DataType,
    pub charts: Vec<ChartKind>,
    pub formatter: Arc<dyn LabelFormatter>,
}

impl ReportDefinition {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            group_by: None,
            data_type: DataType::Total,
            charts: vec![ChartKind::Timeline],
            formatter: Arc::new(Identity),
        }
    }

    pub fn group_by(mut self, group_by: GroupBy) -> Self {
        self.group_by = Some(group_by);
        self
    }

    pub fn data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }

    /// Replace the requested charts. Charts are stacked in this order.
    pub fn charts(mut self, charts: &[ChartKind]) -> Self {
        self.charts = charts.to_vec();
        self
    }

    pub fn formatter<F: LabelFormatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Arc::new(formatter);
        self
    }
}

impl fmt::Debug for ReportDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportDefinition")
            .field("title", &self.title)
            .field("group_by", &self.group_by)
            .field("data_type", &self.data_type)
            .field("charts", &self.charts)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// A finished report: its presentation-ordered table plus the charts to draw.
#[derive(Clone)]
pub struct Report {
    pub title: String,
    pub data_type: DataType,
    pub table: PivotTable,
    pub charts: Vec<ChartKind>,
    pub formatter: Arc<dyn LabelFormatter>,
}

impl Report {
    /// Plan this report's chart placements.
    pub fn chart_specs(&self, layout: &ChartLayout) -> Vec<ChartSpec> {
        plan_charts(&self.table, &self.charts, layout)
    }
}

impl fmt::Debug for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Report")
            .field("title", &self.title)
            .field("data_type", &self.data_type)
            .field("table", &self.table)
            .field("charts", &self.charts)
            .finish_non_exhaustive()
    }
}

/// Run `records` through aggregation, the definition's data type, and the pivot.
pub fn build_report<I>(definition: &ReportDefinition, records: I) -> Result<Report>
where
    I: IntoIterator<Item = Result<PeriodRecord>>,
{
    let table = aggregate(records, definition.formatter.as_ref())?;
    let table = pivot(definition.data_type.apply(table));

    if table.is_empty() {
        warn!(title = %definition.title, "report has no data");
    }
    info!(
        title = %definition.title,
        labels = table.row_count(),
        periods = table.column_count(),
        "created report"
    );

    Ok(Report {
        title: definition.title.clone(),
        data_type: definition.data_type,
        table,
        charts: definition.charts.clone(),
        formatter: Arc::clone(&definition.formatter),
    })
}

/// The standard catalogue: totals, sub-products, services, and regions, each
/// as absolute amounts and as month-over-month changes.
pub fn default_reports() -> Vec<ReportDefinition> {
    let sub_product = GroupBy::tag("SubProduct");
    let services = GroupBy::dimension("SERVICE");
    let regions = GroupBy::dimension("REGION");

    vec![
        ReportDefinition::new("Total"),
        ReportDefinition::new("TotalChange").data_type(DataType::Delta),
        ReportDefinition::new("SubProduct")
            .group_by(sub_product.clone())
            .formatter(StripPrefix::new("SubProduct$")),
        ReportDefinition::new("SubProductChange")
            .group_by(sub_product)
            .data_type(DataType::Delta)
            .formatter(StripPrefix::new("SubProduct$")),
        ReportDefinition::new("Services").group_by(services.clone()),
        ReportDefinition::new("ServicesChange")
            .group_by(services)
            .data_type(DataType::Delta),
        ReportDefinition::new("Regions").group_by(regions.clone()),
        ReportDefinition::new("RegionsChange")
            .group_by(regions)
            .data_type(DataType::Delta),
    ]
}
