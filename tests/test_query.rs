//! Query window and request-body tests.

mod common;

use common::ymd;
use cost_report::config::default_excluded_record_types;
use cost_report::{CostQuery, CostReportError, GroupBy};

#[test]
fn monthly_window_covers_whole_previous_months() {
    let query = CostQuery::monthly(ymd(2024, 7, 15), 6, "UnblendedCost").unwrap();
    assert_eq!(query.time_period.start, ymd(2024, 1, 1));
    assert_eq!(query.time_period.end, ymd(2024, 7, 1));
}

#[test]
fn window_crosses_year_boundary() {
    let query = CostQuery::monthly(ymd(2024, 2, 29), 3, "UnblendedCost").unwrap();
    assert_eq!(query.time_period.start, ymd(2023, 11, 1));
    assert_eq!(query.time_period.end, ymd(2024, 2, 1));
}

#[test]
fn window_from_month_end_clamps_before_snapping() {
    let query = CostQuery::monthly(ymd(2024, 3, 31), 1, "UnblendedCost").unwrap();
    assert_eq!(query.time_period.start, ymd(2024, 2, 1));
    assert_eq!(query.time_period.end, ymd(2024, 3, 1));
}

#[test]
fn zero_lookback_is_rejected() {
    let err = CostQuery::monthly(ymd(2024, 7, 15), 0, "UnblendedCost").unwrap_err();
    assert!(matches!(err, CostReportError::InvalidArgument(_)));
}

#[test]
fn request_body_for_ungrouped_query() {
    let query = CostQuery::monthly(ymd(2024, 7, 15), 6, "UnblendedCost")
        .unwrap()
        .excluding(&default_excluded_record_types());
    let body = query.request_body(None).unwrap();

    assert_eq!(
        body,
        serde_json::json!({
            "TimePeriod": {"Start": "2024-01-01", "End": "2024-07-01"},
            "Granularity": "MONTHLY",
            "Metrics": ["UnblendedCost"],
            "GroupBy": [],
            "Filter": {
                "Not": {
                    "Dimensions": {
                        "Key": "RECORD_TYPE",
                        "Values": ["Credit", "Refund", "Upfront"]
                    }
                }
            }
        })
    );
}

#[test]
fn request_body_carries_group_and_token() {
    let query = CostQuery::monthly(ymd(2024, 7, 15), 6, "BlendedCost")
        .unwrap()
        .group_by(GroupBy::tag("SubProduct"));
    let body = query.request_body(Some("abc")).unwrap();

    assert_eq!(body["GroupBy"], serde_json::json!([{"Type": "TAG", "Key": "SubProduct"}]));
    assert_eq!(body["Metrics"], serde_json::json!(["BlendedCost"]));
    assert_eq!(body["NextPageToken"], "abc");
    assert!(body.get("Filter").is_none());
}

#[test]
fn dimension_group_serializes_type() {
    let query = CostQuery::monthly(ymd(2024, 7, 15), 1, "UnblendedCost")
        .unwrap()
        .group_by(GroupBy::dimension("SERVICE"));
    assert_eq!(query.request_body(None).unwrap()["GroupBy"][0]["Type"], "DIMENSION");
}
