use chrono::NaiveDate;

use super::wire::{MetricValue, ResultByTime};
use crate::error::{CostReportError, Result};

// ---------------------------------------------------------------------------
// PeriodAmounts — Either one ungrouped total or a set of grouped amounts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum PeriodAmounts {
    Total(f64),
    Groups(Vec<(String, f64)>),
}

// ---------------------------------------------------------------------------
// PeriodRecord — One billing period, ready for aggregation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodRecord {
    pub start: NaiveDate,
    pub amounts: PeriodAmounts,
}

impl PeriodRecord {
    pub fn total(start: NaiveDate, amount: f64) -> Self {
        Self {
            start,
            amounts: PeriodAmounts::Total(amount),
        }
    }

    pub fn groups<K: Into<String>>(start: NaiveDate, groups: Vec<(K, f64)>) -> Self {
        Self {
            start,
            amounts: PeriodAmounts::Groups(
                groups.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            ),
        }
    }

    /// Convert a wire result into a record, reading `metric` from it.
    ///
    /// An empty `Groups` list means the query was ungrouped, so the period total
    /// is used. Missing periods, missing metrics, empty group keys, and
    /// unparsable or non-finite amounts are reported as [`CostReportError::Schema`].
    pub fn from_result(result: &ResultByTime, metric: &str) -> Result<Self> {
        let start = result
            .time_period
            .as_ref()
            .map(|p| p.start)
            .ok_or_else(|| CostReportError::Schema("result has no TimePeriod".to_string()))?;

        if result.groups.is_empty() {
            let amount = parse_amount(result.total.get(metric), metric, &start.to_string())?;
            return Ok(Self::total(start, amount));
        }

        let mut groups = Vec::with_capacity(result.groups.len());
        for group in &result.groups {
            let key = group
                .keys
                .first()
                .filter(|k| !k.is_empty())
                .ok_or_else(|| {
                    CostReportError::Schema(format!("group without a key in period {}", start))
                })?;
            let amount = parse_amount(group.metrics.get(metric), metric, key)?;
            groups.push((key.clone(), amount));
        }

        Ok(Self {
            start,
            amounts: PeriodAmounts::Groups(groups),
        })
    }
}

fn parse_amount(value: Option<&MetricValue>, metric: &str, context: &str) -> Result<f64> {
    let raw = value
        .and_then(|v| v.amount.as_deref())
        .ok_or_else(|| {
            CostReportError::Schema(format!("missing {} amount for {}", metric, context))
        })?;
    let amount = raw.trim().parse::<f64>().map_err(|e| {
        CostReportError::Schema(format!(
            "invalid {} amount {:?} for {}: {}",
            metric, raw, context, e
        ))
    })?;
    if !amount.is_finite() {
        return Err(CostReportError::Schema(format!(
            "non-finite {} amount {:?} for {}",
            metric, raw, context
        )));
    }
    Ok(amount)
}
