//! Tests for series normalization.

use super::*;
use rust_decimal_macros::dec;
use serde_json::json;

fn entries(series: &SparseSeries) -> Vec<(usize, rust_decimal::Decimal)> {
    series.iter().collect()
}

#[test]
fn test_flat_series_keeps_positions() {
    let series = normalize_json(&json!([100, null, "105.5", "abc", 110]));
    assert_eq!(
        entries(&series),
        vec![(0, dec!(100)), (2, dec!(105.5)), (4, dec!(110))]
    );
    assert!(!series.contains(1));
}

#[test]
fn test_paired_series_skips_bad_pairs() {
    let series = normalize_json(&json!([
        [0, 1],
        [3, "2"],
        [1],
        ["x", 3],
        [5, null],
        [6, 7, 8]
    ]));
    assert_eq!(entries(&series), vec![(0, dec!(1)), (3, dec!(2))]);
}

#[test]
fn test_pair_shape_is_decided_by_first_element() {
    // first element is not a pair, so the array is read positionally
    let series = normalize_json(&json!([[1, 2, 3], 5]));
    assert_eq!(entries(&series), vec![(1, dec!(5))]);
}

#[test]
fn test_scalar_is_index_zero() {
    let series = normalize_json(&json!(42));
    assert_eq!(entries(&series), vec![(0, dec!(42))]);
}

#[test]
fn test_unrecognised_inputs_are_empty() {
    assert!(normalize_json(&json!(null)).is_empty());
    assert!(normalize_json(&json!("100")).is_empty());
    assert!(normalize_json(&json!({"0": 1})).is_empty());
    assert!(normalize_json(&json!([])).is_empty());
    assert_eq!(normalize(&RawSeries::Empty), SparseSeries::new());
}

#[test]
fn test_raw_series_classification() {
    assert_eq!(RawSeries::from_json(&json!(7)), RawSeries::Scalar(dec!(7)));
    assert!(matches!(
        RawSeries::from_json(&json!([[0, 1]])),
        RawSeries::Paired(_)
    ));
    assert!(matches!(
        RawSeries::from_json(&json!([1, 2])),
        RawSeries::Flat(_)
    ));
    assert_eq!(RawSeries::from_json(&json!(true)), RawSeries::Empty);
}
