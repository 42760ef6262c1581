//! Defaults and the explicit configuration passed into the pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::chart::ChartLayout;
use crate::error::{CostReportError, Result};

pub const DEFAULT_LOOKBACK_MONTHS: u32 = 6;
pub const DEFAULT_METRIC: &str = "UnblendedCost";
pub const DEFAULT_OUTPUT_FILE: &str = "cost_explorer_report.xlsx";

/// Dimension used to exclude record categories from every query.
pub const RECORD_TYPE_DIMENSION: &str = "RECORD_TYPE";

/// Column header written above the label column of every report sheet.
pub const LABEL_HEADER: &str = "label";

/// Column name used when a period carries a single ungrouped total.
pub const TOTAL_COLUMN: &str = "Total";

pub fn default_excluded_record_types() -> Vec<String> {
    ["Credit", "Refund", "Upfront"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// ReportConfig
// ---------------------------------------------------------------------------

/// Process-wide settings for one reporting run.
///
/// Every field has a default, so a partial JSON document such as
/// `{"lookback_months": 3}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Number of whole months before the current one covered by each query.
    pub lookback_months: u32,
    /// Cost metric requested from the data source.
    pub metric: String,
    /// `RECORD_TYPE` values removed from consideration.
    pub excluded_record_types: Vec<String>,
    /// Where the workbook is written.
    pub output_path: PathBuf,
    /// Chart anchoring on each sheet.
    pub layout: ChartLayout,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            lookback_months: DEFAULT_LOOKBACK_MONTHS,
            metric: DEFAULT_METRIC.to_string(),
            excluded_record_types: default_excluded_record_types(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            layout: ChartLayout::default(),
        }
    }
}

impl ReportConfig {
    /// Load a configuration from a JSON file; missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.lookback_months == 0 {
            return Err(CostReportError::InvalidArgument(
                "lookback_months must be at least 1".to_string(),
            ));
        }
        if self.metric.trim().is_empty() {
            return Err(CostReportError::InvalidArgument(
                "metric must not be empty".to_string(),
            ));
        }
        self.layout.validate()
    }
}
