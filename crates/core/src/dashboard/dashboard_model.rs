use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{scale_components, scale_portfolio, ChartData, ChartDataset, ChartScale};
use crate::constants::HISTORY_TABLE_DISPLAY_ROWS;
use crate::portfolio::metrics::PortfolioMetrics;
use crate::portfolio::performance::{HistoryRow, HistorySource, HistoryTable};
use crate::portfolio::snapshot::Component;

/// Everything the dashboard shows for one account.
///
/// Every dataset holds exactly `labels.len()` values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub labels: Vec<String>,
    pub portfolio_datasets: Vec<ChartDataset>,
    pub component_datasets: Vec<ChartDataset>,
    pub composition: Vec<Component>,
    pub history: HistoryTable,
    pub metrics: PortfolioMetrics,
    pub scaling_factor: Decimal,
    pub anchor_position: usize,
    /// Set when no history could be anchored and only the current value is shown.
    pub degenerate: bool,
    pub source: HistorySource,
}

impl DashboardView {
    pub fn portfolio_chart(&self, scale: ChartScale) -> ChartData {
        ChartData {
            labels: self.labels.clone(),
            datasets: scale_portfolio(&self.portfolio_datasets, scale),
            scale,
        }
    }

    pub fn components_chart(&self, scale: ChartScale) -> ChartData {
        ChartData {
            labels: self.labels.clone(),
            datasets: scale_components(&self.component_datasets, scale),
            scale,
        }
    }

    /// Trailing rows shown in the history table.
    pub fn recent_history(&self) -> &[HistoryRow] {
        self.history.recent(HISTORY_TABLE_DISPLAY_ROWS)
    }
}
