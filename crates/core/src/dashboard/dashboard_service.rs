use chrono::NaiveDate;
use log::{debug, info};
use serde_json::Value;

use super::{component_datasets, portfolio_datasets, DashboardView};
use crate::errors::Result;
use crate::portfolio::allocation::decompose;
use crate::portfolio::metrics::PortfolioMetrics;
use crate::portfolio::performance::{reconstruct_performance, HistoryTable};
use crate::portfolio::snapshot::{HistoryPayload, PortfolioPayload, PortfolioSnapshot};
use crate::settings::DashboardSettings;

/// Runs the whole pipeline over a snapshot payload and a history payload.
///
/// Both payloads must be JSON objects; anything inside them that cannot be
/// read is skipped rather than reported.
pub fn build_dashboard(
    snapshot_json: &Value,
    history_json: &Value,
    reference: NaiveDate,
    settings: &DashboardSettings,
) -> Result<DashboardView> {
    let snapshot_payload = PortfolioPayload::from_json(snapshot_json)?;
    let history_payload = HistoryPayload::from_json(history_json)?;
    Ok(build_dashboard_from_payloads(
        &snapshot_payload,
        &history_payload,
        reference,
        settings,
    ))
}

pub fn build_dashboard_from_payloads(
    snapshot_payload: &PortfolioPayload,
    history_payload: &HistoryPayload,
    reference: NaiveDate,
    settings: &DashboardSettings,
) -> DashboardView {
    let snapshot = PortfolioSnapshot::from_payload(snapshot_payload);
    let series = reconstruct_performance(
        history_payload,
        snapshot.total_value,
        reference,
        settings,
    );
    let components = decompose(&snapshot.components, &series.real);
    let history = HistoryTable::from_series(&series.labels, &series.real);

    debug!(
        "Dashboard: {} periods, {} components, scaling factor {}",
        series.labels.len(),
        components.len(),
        series.scaling_factor
    );
    if series.is_degenerate() {
        info!("No anchorable history; showing the current value only");
    }

    DashboardView {
        portfolio_datasets: portfolio_datasets(&series),
        component_datasets: component_datasets(&components),
        composition: snapshot.components,
        history,
        metrics: PortfolioMetrics::from_payloads(snapshot_payload, history_payload),
        scaling_factor: series.scaling_factor,
        anchor_position: series.anchor_position,
        degenerate: series.is_degenerate(),
        source: series.source,
        labels: series.labels,
    }
}
