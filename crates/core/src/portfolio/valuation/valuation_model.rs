//! Reconciliation of the historical series with the live portfolio value.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Real series aligned with the windowed periods and rescaled so that the
/// most recent observation equals the live total value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    /// Scaled values, one per windowed period. `None` means not observed.
    pub values: Vec<Option<Decimal>>,
    /// Unscaled values at the same positions.
    pub raw_values: Vec<Option<Decimal>>,
    pub scaling_factor: Decimal,
    /// Position of the most recent real observation.
    pub anchor_position: usize,
    /// Set when no usable anchor exists and `values` is the single-point fallback.
    pub degenerate: bool,
}

impl Reconciliation {
    /// Single-point series at the live value, used when nothing can be anchored.
    pub fn current_value_only(current_total_value: Decimal) -> Self {
        Self {
            values: vec![Some(current_total_value)],
            raw_values: vec![Some(current_total_value)],
            scaling_factor: Decimal::ONE,
            anchor_position: 0,
            degenerate: true,
        }
    }

    pub fn anchor_value(&self) -> Option<Decimal> {
        self.values.get(self.anchor_position).copied().flatten()
    }

    pub fn anchor_raw_value(&self) -> Option<Decimal> {
        self.raw_values.get(self.anchor_position).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
