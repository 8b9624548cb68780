//! Display-window filtering of upstream periods.

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{PeriodEntry, RawPeriod, WindowedPeriods};
use crate::settings::WindowSettings;
use crate::utils::decimal_utils::index_from_json;
use crate::utils::time_utils::{month_end_before, months_before, parse_period_date};

/// Inclusive date range of periods shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Window around `reference`: from the history floor (or `months_back`
    /// before the reference) to the month end preceding `reference + months_forward`.
    pub fn around(reference: NaiveDate, settings: &WindowSettings) -> Self {
        let start = settings
            .history_floor
            .unwrap_or_else(|| months_before(reference, settings.months_back));
        let end = month_end_before(reference, settings.months_forward);
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Reads `performance.period`. Strings are bare periods indexed by position,
/// `[index, "date"]` arrays carry their own index. Other shapes are dropped.
pub fn parse_periods(value: &Value) -> Vec<RawPeriod> {
    let Some(items) = value.as_array() else {
        debug!("performance.period is not an array, ignoring it");
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(position, item)| match item {
            Value::String(date) => Some(RawPeriod::Bare {
                position,
                date: date.clone(),
            }),
            Value::Array(pair) if pair.len() >= 2 => {
                let index = index_from_json(&pair[0])?;
                let date = pair[1].as_str()?;
                Some(RawPeriod::Indexed {
                    index,
                    date: date.to_string(),
                })
            }
            other => {
                debug!("Skipping malformed period at {}: {}", position, other);
                None
            }
        })
        .collect()
}

/// Keeps the periods whose date parses and falls inside `window`, preserving
/// their order. Unparsable dates are excluded, never defaulted.
pub fn filter_periods(periods: &[RawPeriod], window: &DateWindow) -> WindowedPeriods {
    let mut kept = WindowedPeriods::default();
    for period in periods {
        let Some(date) = parse_period_date(period.date_text()) else {
            debug!(
                "Skipping period {} with unparsable date '{}'",
                period.original_index(),
                period.date_text()
            );
            continue;
        };
        if window.contains(date) {
            kept.push(PeriodEntry {
                original_index: period.original_index(),
                date,
            });
        }
    }
    kept
}

/// Convenience wrapper: window computed from `reference` and `settings`.
pub fn filter_periods_around(
    periods: &[RawPeriod],
    reference: NaiveDate,
    settings: &WindowSettings,
) -> WindowedPeriods {
    filter_periods(periods, &DateWindow::around(reference, settings))
}
