use crate::portfolio::performance::SparseSeries;
use crate::portfolio::valuation::Reconciliation;

use log::{debug, warn};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Lays the sparse real series out over the windowed periods.
///
/// Position `p` receives the observation recorded at `filtered_indices[p]`;
/// observations outside the window are dropped.
pub fn align_to_window(sparse_real: &SparseSeries, filtered_indices: &[usize]) -> Vec<Option<Decimal>> {
    // A repeated index maps to its first position.
    let mut positions: HashMap<usize, usize> = HashMap::with_capacity(filtered_indices.len());
    for (position, index) in filtered_indices.iter().enumerate() {
        positions.entry(*index).or_insert(position);
    }

    let mut aligned = vec![None; filtered_indices.len()];
    for (index, value) in sparse_real.iter() {
        if let Some(&position) = positions.get(&index) {
            aligned[position] = Some(value);
        }
    }
    aligned
}

/// Rescales the windowed real series so that its most recent observation
/// coincides with `current_total_value`.
///
/// The anchor is the *last* observed position, never the first.
/// Without any observation, or when the anchor value is zero, the result is
/// the single-point fallback `[current_total_value]` with a factor of 1.
///
/// # Arguments
///
/// * `sparse_real` - Normalized real series keyed by original period index.
/// * `filtered_indices` - Original indices of the windowed periods, in display order.
/// * `current_total_value` - Live total value of the portfolio.
///
pub fn reconcile(
    sparse_real: &SparseSeries,
    filtered_indices: &[usize],
    current_total_value: Decimal,
) -> Reconciliation {
    let raw_values = align_to_window(sparse_real, filtered_indices);

    let Some(anchor_position) = raw_values.iter().rposition(Option::is_some) else {
        debug!(
            "No real observation inside the window ({} periods); using the current value only",
            filtered_indices.len()
        );
        return Reconciliation::current_value_only(current_total_value);
    };

    let anchor_raw = raw_values[anchor_position].unwrap_or(Decimal::ZERO);
    let Some(scaling_factor) = current_total_value.checked_div(anchor_raw) else {
        warn!(
            "Real value at anchor position {} is {}; cannot scale to {}, using the current value only",
            anchor_position, anchor_raw, current_total_value
        );
        return Reconciliation::current_value_only(current_total_value);
    };

    let mut values: Vec<Option<Decimal>> = raw_values
        .iter()
        .enumerate()
        .map(|(position, value)| {
            let raw = (*value)?;
            let scaled = raw.checked_mul(scaling_factor);
            if scaled.is_none() {
                warn!(
                    "Scaling {} by {} at position {} overflows; dropping the observation",
                    raw, scaling_factor, position
                );
            }
            scaled
        })
        .collect();
    // The anchor equals the live total exactly.
    values[anchor_position] = Some(current_total_value);

    Reconciliation {
        values,
        raw_values,
        scaling_factor,
        anchor_position,
        degenerate: false,
    }
}

/// Uses the already-scaled series as the real line (fallback history source).
///
/// The anchor is still the last observed position; values are not rescaled.
pub fn reconcile_unscaled(values: Vec<Option<Decimal>>, current_total_value: Decimal) -> Reconciliation {
    match values.iter().rposition(Option::is_some) {
        Some(anchor_position) => Reconciliation {
            raw_values: values.clone(),
            values,
            scaling_factor: Decimal::ONE,
            anchor_position,
            degenerate: false,
        },
        None => Reconciliation::current_value_only(current_total_value),
    }
}
