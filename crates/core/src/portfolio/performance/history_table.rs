use rust_decimal::Decimal;

use super::{HistoryRow, HistoryTable, ReturnPoint};
use crate::constants::PERCENT_DECIMAL_PRECISION;

/// Period-over-period returns of a reconciled series, in percent.
///
/// A return exists only when both the value and its predecessor are observed
/// and the predecessor is non-zero. Otherwise the return is `None` ("no data"),
/// which is distinct from a real 0% return.
pub fn build_returns(values: &[Option<Decimal>]) -> Vec<ReturnPoint> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let previous = if i == 0 { None } else { values[i - 1] };
            let return_pct = match (*value, previous) {
                (Some(current), Some(previous)) => period_return_pct(current, previous),
                _ => None,
            };
            ReturnPoint {
                value: *value,
                return_pct,
            }
        })
        .collect()
}

fn period_return_pct(current: Decimal, previous: Decimal) -> Option<Decimal> {
    (current - previous)
        .checked_div(previous)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|pct| pct.round_dp(PERCENT_DECIMAL_PRECISION))
}

impl HistoryTable {
    /// One row per label; labels and values must be aligned.
    pub fn from_series(labels: &[String], values: &[Option<Decimal>]) -> Self {
        let rows = labels
            .iter()
            .zip(build_returns(values))
            .map(|(label, point)| HistoryRow {
                label: label.clone(),
                value: point.value,
                return_pct: point.return_pct,
            })
            .collect();
        Self { rows }
    }

    /// The last `count` rows.
    pub fn recent(&self, count: usize) -> &[HistoryRow] {
        let start = self.rows.len().saturating_sub(count);
        &self.rows[start..]
    }

    /// Whether showing `count` rows hides older ones.
    pub fn is_truncated(&self, count: usize) -> bool {
        self.rows.len() > count
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
