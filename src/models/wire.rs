use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DateInterval — Start (inclusive) / End (exclusive) of a billing period
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DateInterval {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

// ---------------------------------------------------------------------------
// MetricValue — Amount as returned by the data source (decimal string)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricValue {
    pub amount: Option<String>,
    pub unit: Option<String>,
}

// ---------------------------------------------------------------------------
// CostGroup — One (group key, metrics) pair inside a period
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CostGroup {
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default)]
    pub metrics: HashMap<String, MetricValue>,
}

// ---------------------------------------------------------------------------
// ResultByTime — One billing period
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResultByTime {
    pub time_period: Option<DateInterval>,
    #[serde(default)]
    pub total: HashMap<String, MetricValue>,
    #[serde(default)]
    pub groups: Vec<CostGroup>,
    #[serde(default)]
    pub estimated: bool,
}

// ---------------------------------------------------------------------------
// CostPage — One response page of the cost-and-usage query
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CostPage {
    #[serde(default)]
    pub results_by_time: Vec<ResultByTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl CostPage {
    /// A page without a continuation token (or with an empty one) ends the sequence.
    pub fn is_terminal(&self) -> bool {
        self.next_page_token.as_deref().map_or(true, str::is_empty)
    }
}
