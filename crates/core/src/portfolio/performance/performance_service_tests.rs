//! Tests for performance reconstruction.

use super::*;
use crate::portfolio::snapshot::HistoryPayload;
use crate::settings::{DashboardSettings, LabelFormat, ProjectionBasis};
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde_json::json;

fn reference() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, 21).unwrap()
}

fn history(value: serde_json::Value) -> HistoryPayload {
    HistoryPayload::from_json(&value).unwrap()
}

fn six_month_history() -> HistoryPayload {
    history(json!({
        "performance": {
            "period": [
                "2024-12-31", "2025-01-31", "2025-02-28",
                "2025-03-31", "2025-04-30", "2025-05-31"
            ],
            "real": [1000, 1100, 1200],
            "expected": [100, 110, 120, 130, 140, 150],
            "best_return": [[3, "0.1"], [4, "0.1"]]
        }
    }))
}

#[test]
fn test_reconstruct_scales_real_and_projects() {
    let series = reconstruct_performance(
        &six_month_history(),
        dec!(2400),
        reference(),
        &DashboardSettings::default(),
    );

    assert_eq!(series.source, HistorySource::Performance);
    assert_eq!(series.labels[0], "31/12/2024");
    assert_eq!(series.labels.len(), 6);
    assert_eq!(series.scaling_factor, dec!(2));
    assert_eq!(series.anchor_position, 2);
    assert_eq!(
        series.real,
        vec![Some(dec!(2000)), Some(dec!(2200)), Some(dec!(2400)), None, None, None]
    );
    assert_eq!(
        series.projections.expected,
        vec![
            Some(dec!(2000)),
            Some(dec!(2200)),
            Some(dec!(2400)),
            Some(dec!(2600)),
            Some(dec!(2800)),
            Some(dec!(3000))
        ]
    );
    assert!(!series.is_degenerate());
}

#[test]
fn test_reconstruct_with_period_returns() {
    let settings = DashboardSettings {
        projection_basis: ProjectionBasis::PeriodReturn,
        ..DashboardSettings::default()
    };
    let series = reconstruct_performance(&six_month_history(), dec!(2400), reference(), &settings);
    assert_eq!(series.projections.best[3], Some(dec!(2640)));
    assert_eq!(series.projections.best[4], Some(dec!(2904)));
    assert_eq!(series.projections.best[5], Some(dec!(2904)));
    assert_eq!(series.projections.worst[5], Some(dec!(2400)));
}

#[test]
fn test_window_drops_out_of_range_periods() {
    let payload = history(json!({
        "performance": {
            "period": ["2023-01-31", "2025-01-31", "2026-01-31"],
            "real": [10, 20, 30]
        }
    }));
    let series = reconstruct_performance(&payload, dec!(40), reference(), &DashboardSettings::default());
    assert_eq!(series.labels, vec!["31/01/2025".to_string()]);
    assert_eq!(series.real, vec![Some(dec!(40))]);
    assert_eq!(series.scaling_factor, dec!(2));
}

#[test]
fn test_no_real_observation_falls_back_to_current_value() {
    let payload = history(json!({
        "performance": { "period": ["2025-01-31", "2025-02-28"], "real": [] }
    }));
    let series = reconstruct_performance(&payload, dec!(2400), reference(), &DashboardSettings::default());

    assert!(series.is_degenerate());
    assert_eq!(series.labels, vec!["21/04/2025".to_string()]);
    assert_eq!(series.real, vec![Some(dec!(2400))]);
    assert_eq!(series.projections.expected, vec![Some(dec!(2400))]);
    assert_eq!(series.projections.worst, vec![Some(dec!(2400))]);
    assert_eq!(series.scaling_factor, dec!(1));
}

#[test]
fn test_zero_anchor_falls_back_to_current_value() {
    let payload = history(json!({
        "performance": { "period": ["2025-01-31", "2025-02-28"], "real": [100, 0] }
    }));
    let series = reconstruct_performance(&payload, dec!(500), reference(), &DashboardSettings::default());
    assert!(series.is_degenerate());
    assert_eq!(series.real, vec![Some(dec!(500))]);
}

#[test]
fn test_portfolio_history_fallback() {
    let payload = history(json!({
        "performance": { "real": [1, 2, 3] },
        "portfolios": [
            { "date": "2025-03-01", "total_amount": 900 },
            { "date": "2025-01-01", "total_amount": "800" },
            { "date": "2025-02-01", "total_amount": 0 },
            { "date": "bad", "total_amount": 5 },
            { "date": "2019-01-01", "total_amount": 100 },
            { "total_amount": 100 }
        ]
    }));
    let settings = DashboardSettings {
        label_format: LabelFormat::MonthYear,
        ..DashboardSettings::default()
    };
    let series = reconstruct_performance(&payload, dec!(1000), reference(), &settings);

    assert_eq!(series.source, HistorySource::PortfolioHistory);
    assert_eq!(series.labels, vec!["Jan 2025".to_string(), "Mar 2025".to_string()]);
    assert_eq!(series.real, vec![Some(dec!(800)), Some(dec!(900))]);
    assert_eq!(series.scaling_factor, dec!(1));
    assert_eq!(series.anchor_position, 1);
    assert!(series.projections.is_empty());
}

#[test]
fn test_empty_history_is_current_value_only() {
    let series = reconstruct_performance(
        &HistoryPayload::default(),
        dec!(321),
        reference(),
        &DashboardSettings::default(),
    );
    assert_eq!(series.source, HistorySource::CurrentValueOnly);
    assert_eq!(series.real, vec![Some(dec!(321))]);
}
