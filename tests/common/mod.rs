//! Shared test fixtures for the cost-report integration tests.
//!
//! Builds wire-format cost pages with `serde_json::json!` so tests exercise the
//! same deserialization path as a live data source.

#![allow(dead_code)]

use chrono::NaiveDate;
use cost_report::models::CostPage;
use cost_report::{PeriodRecord, Result};

pub const METRIC: &str = "UnblendedCost";

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// First day of month `month` in 2024.
pub fn month(month: u32) -> NaiveDate {
    ymd(2024, month, 1)
}

/// Wrap records as the `Ok` items an aggregator consumes.
pub fn ok_records(records: Vec<PeriodRecord>) -> Vec<Result<PeriodRecord>> {
    records.into_iter().map(Ok).collect()
}

/// Ungrouped monthly totals starting in January 2024.
pub fn monthly_totals(amounts: &[f64]) -> Vec<PeriodRecord> {
    amounts
        .iter()
        .enumerate()
        .map(|(i, amount)| PeriodRecord::total(month(i as u32 + 1), *amount))
        .collect()
}

/// One ungrouped period in wire format.
pub fn total_result(start: NaiveDate, amount: &str) -> serde_json::Value {
    let end = start.checked_add_months(chrono::Months::new(1)).unwrap();
    serde_json::json!({
        "TimePeriod": {"Start": start.to_string(), "End": end.to_string()},
        "Total": {METRIC: {"Amount": amount, "Unit": "USD"}},
        "Groups": [],
        "Estimated": false
    })
}

/// One grouped period in wire format.
pub fn grouped_result(start: NaiveDate, groups: &[(&str, &str)]) -> serde_json::Value {
    let end = start.checked_add_months(chrono::Months::new(1)).unwrap();
    let groups: Vec<serde_json::Value> = groups
        .iter()
        .map(|(key, amount)| {
            serde_json::json!({
                "Keys": [key],
                "Metrics": {METRIC: {"Amount": amount, "Unit": "USD"}}
            })
        })
        .collect();
    serde_json::json!({
        "TimePeriod": {"Start": start.to_string(), "End": end.to_string()},
        "Total": {},
        "Groups": groups,
        "Estimated": false
    })
}

/// A page of results, continued by `next` when given.
pub fn page(results: Vec<serde_json::Value>, next: Option<&str>) -> CostPage {
    let mut value = serde_json::json!({ "ResultsByTime": results });
    if let Some(token) = next {
        value["NextPageToken"] = serde_json::json!(token);
    }
    serde_json::from_value(value).unwrap()
}
