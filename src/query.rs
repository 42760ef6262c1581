//! Cost-and-usage query construction.
//!
//! A [`CostQuery`] describes one full pull of historical data: a monthly time
//! window, one metric, at most one grouping dimension, and the record types
//! excluded from consideration. [`CostQuery::request_body`] renders it in the
//! data source's JSON request shape.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use cost_report::query::{CostQuery, GroupBy};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
//! let query = CostQuery::monthly(today, 6, "UnblendedCost")
//!     .unwrap()
//!     .group_by(GroupBy::dimension("SERVICE"));
//! assert_eq!(query.time_period.start.to_string(), "2024-01-01");
//! assert_eq!(query.time_period.end.to_string(), "2024-07-01");
//! ```

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::RECORD_TYPE_DIMENSION;
use crate::error::{CostReportError, Result};
use crate::models::DateInterval;

// ---------------------------------------------------------------------------
// Granularity / GroupBy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Granularity {
    Monthly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GroupKind {
    Tag,
    Dimension,
}

/// A single grouping dimension, e.g. `TAG SubProduct` or `DIMENSION SERVICE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GroupBy {
    #[serde(rename = "Type")]
    pub kind: GroupKind,
    pub key: String,
}

impl GroupBy {
    pub fn tag(key: &str) -> Self {
        Self {
            kind: GroupKind::Tag,
            key: key.to_string(),
        }
    }

    pub fn dimension(key: &str) -> Self {
        Self {
            kind: GroupKind::Dimension,
            key: key.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// CostQuery
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CostQuery {
    pub time_period: DateInterval,
    pub granularity: Granularity,
    pub metric: String,
    pub group_by: Option<GroupBy>,
    pub excluded_record_types: Vec<String>,
}

impl CostQuery {
    /// Build a monthly query covering the `lookback_months` whole months
    /// before the month containing `today`.
    ///
    /// The window starts on the first day of the month `lookback_months`
    /// before `today` and ends (exclusive) on the first day of `today`'s month.
    pub fn monthly(today: NaiveDate, lookback_months: u32, metric: &str) -> Result<Self> {
        if lookback_months == 0 {
            return Err(CostReportError::InvalidArgument(
                "lookback window must cover at least one month".to_string(),
            ));
        }
        let start = today
            .checked_sub_months(Months::new(lookback_months))
            .and_then(|d| d.with_day(1))
            .ok_or_else(|| {
                CostReportError::InvalidArgument(format!(
                    "cannot go back {} months from {}",
                    lookback_months, today
                ))
            })?;
        let end = today.with_day(1).ok_or_else(|| {
            CostReportError::InvalidArgument(format!("invalid date {}", today))
        })?;

        Ok(Self {
            time_period: DateInterval { start, end },
            granularity: Granularity::Monthly,
            metric: metric.to_string(),
            group_by: None,
            excluded_record_types: Vec::new(),
        })
    }

    pub fn group_by(mut self, group_by: GroupBy) -> Self {
        self.group_by = Some(group_by);
        self
    }

    /// Exclude the given `RECORD_TYPE` values (credits, refunds, ...).
    pub fn excluding(mut self, record_types: &[String]) -> Self {
        self.excluded_record_types = record_types.to_vec();
        self
    }

    /// Render the request body, continuing from `next_page_token` if given.
    pub fn request_body(&self, next_page_token: Option<&str>) -> Result<serde_json::Value> {
        let filter = if self.excluded_record_types.is_empty() {
            None
        } else {
            Some(FilterExpression {
                not: DimensionFilter {
                    dimensions: DimensionValues {
                        key: RECORD_TYPE_DIMENSION,
                        values: &self.excluded_record_types,
                    },
                },
            })
        };

        let body = Request {
            time_period: &self.time_period,
            granularity: self.granularity,
            metrics: [self.metric.as_str()],
            group_by: self.group_by.iter().collect(),
            filter,
            next_page_token,
        };
        Ok(serde_json::to_value(body)?)
    }
}

// ---------------------------------------------------------------------------
// Wire shapes for the request body
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Request<'a> {
    time_period: &'a DateInterval,
    granularity: Granularity,
    metrics: [&'a str; 1],
    group_by: Vec<&'a GroupBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<FilterExpression<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_page_token: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct FilterExpression<'a> {
    not: DimensionFilter<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct DimensionFilter<'a> {
    dimensions: DimensionValues<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct DimensionValues<'a> {
    key: &'a str,
    values: &'a [String],
}
