//! Tests for period parsing and display-window filtering.

use super::*;
use crate::settings::WindowSettings;
use chrono::NaiveDate;
use serde_json::json;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn test_window_around_reference_date() {
    let window = DateWindow::around(d(2025, 4, 21), &WindowSettings::default());
    assert_eq!(window.start, d(2024, 11, 21));
    assert_eq!(window.end, d(2025, 8, 31));
    assert!(window.contains(d(2024, 11, 21)));
    assert!(window.contains(d(2025, 8, 31)));
    assert!(!window.contains(d(2025, 9, 1)));
    assert!(!window.contains(d(2024, 11, 20)));
}

#[test]
fn test_history_floor_replaces_months_back() {
    let settings = WindowSettings {
        history_floor: Some(d(2020, 1, 1)),
        ..WindowSettings::default()
    };
    let window = DateWindow::around(d(2025, 4, 21), &settings);
    assert_eq!(window.start, d(2020, 1, 1));
    assert_eq!(window.end, d(2025, 8, 31));
}

#[test]
fn test_parse_periods_mixed_shapes() {
    let periods = parse_periods(&json!([
        "2025-01-31",
        [3, "2025-02-28"],
        5,
        [1],
        "not a date",
        ["7", "2025-03-31"]
    ]));
    assert_eq!(
        periods,
        vec![
            RawPeriod::Bare {
                position: 0,
                date: "2025-01-31".to_string()
            },
            RawPeriod::Indexed {
                index: 3,
                date: "2025-02-28".to_string()
            },
            RawPeriod::Bare {
                position: 4,
                date: "not a date".to_string()
            },
            RawPeriod::Indexed {
                index: 7,
                date: "2025-03-31".to_string()
            },
        ]
    );
}

#[test]
fn test_parse_periods_non_array_is_empty() {
    assert!(parse_periods(&json!(null)).is_empty());
    assert!(parse_periods(&json!({"0": "2025-01-31"})).is_empty());
}

#[test]
fn test_filter_keeps_order_and_original_indices() {
    let periods = parse_periods(&json!([
        "2024-06-30",
        "2024-12-31",
        "garbage",
        "2025-01-31T00:00:00Z",
        "2025-09-30",
        "2025-03-31 00:00:00"
    ]));
    let kept = filter_periods_around(&periods, d(2025, 4, 21), &WindowSettings::default());

    assert_eq!(kept.original_indices, vec![1, 3, 5]);
    assert_eq!(kept.len(), 3);
    assert_eq!(kept.entries[0].date, d(2024, 12, 31));
    assert_eq!(kept.entries[2].date, d(2025, 3, 31));
}

#[test]
fn test_filter_with_nothing_in_window() {
    let periods = parse_periods(&json!(["2019-01-31", "2019-02-28"]));
    let kept = filter_periods_around(&periods, d(2025, 4, 21), &WindowSettings::default());
    assert!(kept.is_empty());
    assert!(kept.original_indices.is_empty());
}
