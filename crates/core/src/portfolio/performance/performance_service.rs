//! End-to-end reconstruction of the performance series of one account.

use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;

use super::{
    extend, filter_periods, normalize_json, parse_periods, DateWindow, HistorySource,
    PerformanceSeries, Projections, ScenarioFactors, SparseSeries,
};
use crate::portfolio::snapshot::{HistoryPayload, PerformancePayload, PortfolioHistoryEntry};
use crate::portfolio::valuation::{reconcile, reconcile_unscaled, Reconciliation};
use crate::settings::{DashboardSettings, LabelFormat, ProjectionBasis};
use crate::utils::time_utils::{format_day_month_year, format_month_year, parse_period_date};

pub fn format_period_label(date: NaiveDate, format: LabelFormat) -> String {
    match format {
        LabelFormat::DayMonthYear => format_day_month_year(date),
        LabelFormat::MonthYear => format_month_year(date),
    }
}

/// Builds the windowed, scaled real series and its projections.
///
/// The `performance` block is used when it carries a period list; otherwise the
/// `portfolios` history is used. When neither yields an observation inside the
/// window the result is a single point at `current_total_value`, labelled with
/// the reference date.
pub fn reconstruct_performance(
    history: &HistoryPayload,
    current_total_value: Decimal,
    reference: NaiveDate,
    settings: &DashboardSettings,
) -> PerformanceSeries {
    let window = DateWindow::around(reference, &settings.window);
    debug!(
        "Reconstructing performance for window {} .. {}",
        window.start, window.end
    );

    match history.performance_with_periods() {
        Some(performance) => from_performance_block(
            performance,
            current_total_value,
            reference,
            &window,
            settings,
        ),
        None => {
            let entries = history.portfolios.as_deref().unwrap_or_default();
            from_portfolio_history(entries, current_total_value, reference, &window, settings)
        }
    }
}

fn from_performance_block(
    performance: &PerformancePayload,
    current_total_value: Decimal,
    reference: NaiveDate,
    window: &DateWindow,
    settings: &DashboardSettings,
) -> PerformanceSeries {
    let periods = performance
        .period
        .as_ref()
        .map(parse_periods)
        .unwrap_or_default();
    let windowed = filter_periods(&periods, window);
    let real = series_or_empty(performance.real.as_ref());

    let reconciliation = reconcile(&real, &windowed.original_indices, current_total_value);
    if reconciliation.degenerate {
        return current_value_only(current_total_value, reference, settings);
    }

    let factors = ScenarioFactors {
        expected: series_or_empty(performance.expected_series()),
        best: series_or_empty(performance.best_series()),
        worst: series_or_empty(performance.worst_series()),
    };
    let projections = extend(
        &reconciliation,
        &windowed.original_indices,
        &factors,
        settings.projection_basis,
    );

    PerformanceSeries {
        labels: windowed
            .entries
            .iter()
            .map(|entry| format_period_label(entry.date, settings.label_format))
            .collect(),
        real: reconciliation.values,
        projections,
        scaling_factor: reconciliation.scaling_factor,
        anchor_position: reconciliation.anchor_position,
        source: HistorySource::Performance,
    }
}

fn from_portfolio_history(
    entries: &[PortfolioHistoryEntry],
    current_total_value: Decimal,
    reference: NaiveDate,
    window: &DateWindow,
    settings: &DashboardSettings,
) -> PerformanceSeries {
    let mut points: Vec<(NaiveDate, Decimal)> = entries
        .iter()
        .filter_map(|entry| {
            let date = parse_period_date(entry.date.as_deref()?)?;
            let value = entry.total_amount.filter(|v| *v > Decimal::ZERO)?;
            window.contains(date).then_some((date, value))
        })
        .collect();
    points.sort_by_key(|(date, _)| *date);

    if points.is_empty() {
        warn!("No usable portfolio history inside the window; using the current value only");
        return current_value_only(current_total_value, reference, settings);
    }

    let reconciliation =
        reconcile_unscaled(points.iter().map(|(_, v)| Some(*v)).collect(), current_total_value);

    PerformanceSeries {
        labels: points
            .iter()
            .map(|(date, _)| format_period_label(*date, settings.label_format))
            .collect(),
        real: reconciliation.values,
        projections: Projections::default(),
        scaling_factor: reconciliation.scaling_factor,
        anchor_position: reconciliation.anchor_position,
        source: HistorySource::PortfolioHistory,
    }
}

fn current_value_only(
    current_total_value: Decimal,
    reference: NaiveDate,
    settings: &DashboardSettings,
) -> PerformanceSeries {
    let reconciliation = Reconciliation::current_value_only(current_total_value);
    let projections = extend(
        &reconciliation,
        &[],
        &ScenarioFactors::default(),
        ProjectionBasis::default(),
    );
    PerformanceSeries {
        labels: vec![format_period_label(reference, settings.label_format)],
        real: reconciliation.values,
        projections,
        scaling_factor: reconciliation.scaling_factor,
        anchor_position: reconciliation.anchor_position,
        source: HistorySource::CurrentValueOnly,
    }
}

fn series_or_empty(value: Option<&serde_json::Value>) -> SparseSeries {
    value.map(normalize_json).unwrap_or_default()
}
