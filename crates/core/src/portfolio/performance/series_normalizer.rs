use log::debug;
use rust_decimal::Decimal;
use serde_json::Value;

use super::{RawSeries, SparseSeries};
use crate::utils::decimal_utils::{decimal_from_json, index_from_json};

/// Converts any upstream series shape into a sparse index -> value map.
///
/// Bad elements (wrong pair arity, non-numeric value or index) are skipped
/// individually; they never invalidate the rest of the series.
pub fn normalize(raw: &RawSeries) -> SparseSeries {
    match raw {
        RawSeries::Scalar(value) => std::iter::once((0, *value)).collect(),
        RawSeries::Flat(items) => items
            .iter()
            .enumerate()
            .filter_map(|(position, item)| match decimal_from_json(item) {
                Some(value) => Some((position, value)),
                None => {
                    debug!("Skipping non-numeric value at position {}: {}", position, item);
                    None
                }
            })
            .collect(),
        RawSeries::Paired(items) => items.iter().filter_map(pair_entry).collect(),
        RawSeries::Empty => SparseSeries::new(),
    }
}

/// Shorthand for `normalize(&RawSeries::from_json(value))`.
pub fn normalize_json(value: &Value) -> SparseSeries {
    normalize(&RawSeries::from_json(value))
}

fn pair_entry(item: &Value) -> Option<(usize, Decimal)> {
    let pair = match item.as_array() {
        Some(pair) if pair.len() == 2 => pair,
        _ => {
            debug!("Skipping malformed series pair: {}", item);
            return None;
        }
    };
    let index = index_from_json(&pair[0]);
    let value = decimal_from_json(&pair[1]);
    match (index, value) {
        (Some(index), Some(value)) => Some((index, value)),
        _ => {
            debug!("Skipping series pair with invalid index or value: {}", item);
            None
        }
    }
}
