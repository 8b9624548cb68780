//! Headline figures shown above the charts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::portfolio::snapshot::{HistoryPayload, PortfolioPayload};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioMetrics {
    pub total_value: Decimal,
    pub cash_amount: Decimal,
    pub additional_cash_needed: Decimal,
    pub annual_return_pct: Decimal,
    pub volatility_pct: Decimal,
}

impl PortfolioMetrics {
    /// A zero `time_return_annual` is treated as unreported and falls through
    /// to `plan_expected_return`.
    pub fn from_payloads(snapshot: &PortfolioPayload, history: &HistoryPayload) -> Self {
        let annual_return = history
            .returns
            .as_ref()
            .and_then(|r| r.time_return_annual)
            .filter(|r| !r.is_zero())
            .or(history.plan_expected_return)
            .unwrap_or(Decimal::ZERO);

        Self {
            total_value: snapshot.total_value(),
            cash_amount: snapshot
                .portfolio
                .as_ref()
                .and_then(|p| p.cash_amount)
                .unwrap_or(Decimal::ZERO),
            additional_cash_needed: snapshot
                .extra
                .as_ref()
                .and_then(|e| e.additional_cash_needed_to_trade)
                .unwrap_or(Decimal::ZERO),
            annual_return_pct: annual_return * Decimal::ONE_HUNDRED,
            volatility_pct: history.volatility.unwrap_or(Decimal::ZERO) * Decimal::ONE_HUNDRED,
        }
    }
}
