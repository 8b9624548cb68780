//! Totals across every account of the user.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::portfolio::snapshot::{HistoryPayload, PortfolioPayload};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountsOverview {
    pub account_count: usize,
    pub total_value: Decimal,
    /// Mean of the accounts' annualised returns, in percent.
    pub average_annual_return_pct: Decimal,
    pub total_contributions: Decimal,
}

impl AccountsOverview {
    /// Missing figures count as zero, including in the return average.
    pub fn aggregate(bundles: &[(PortfolioPayload, HistoryPayload)]) -> Self {
        let mut overview = Self {
            account_count: bundles.len(),
            ..Self::default()
        };
        let mut return_sum = Decimal::ZERO;

        for (snapshot, history) in bundles {
            overview.total_value += snapshot.total_value();
            overview.total_contributions += snapshot
                .extra
                .as_ref()
                .and_then(|e| e.amount_to_trade)
                .unwrap_or(Decimal::ZERO);
            return_sum += history
                .returns
                .as_ref()
                .and_then(|r| r.time_return_annual)
                .unwrap_or(Decimal::ZERO)
                * Decimal::ONE_HUNDRED;
        }

        if !bundles.is_empty() {
            overview.average_annual_return_pct = return_sum / Decimal::from(bundles.len());
        }
        overview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn bundle(total: &str, contributions: Option<&str>, annual: Option<&str>) -> (PortfolioPayload, HistoryPayload) {
        let snapshot = PortfolioPayload::from_json(&json!({
            "portfolio": { "total_amount": total },
            "extra": { "amount_to_trade": contributions }
        }))
        .unwrap();
        let history = HistoryPayload::from_json(&json!({
            "return": { "time_return_annual": annual }
        }))
        .unwrap();
        (snapshot, history)
    }

    #[test]
    fn test_aggregate_two_accounts() {
        let overview = AccountsOverview::aggregate(&[
            bundle("1000", Some("100"), Some("0.04")),
            bundle("3000", None, Some("0.08")),
        ]);
        assert_eq!(overview.account_count, 2);
        assert_eq!(overview.total_value, dec!(4000));
        assert_eq!(overview.total_contributions, dec!(100));
        assert_eq!(overview.average_annual_return_pct, dec!(6));
    }

    #[test]
    fn test_missing_return_counts_as_zero() {
        let overview = AccountsOverview::aggregate(&[
            bundle("500", None, Some("0.1")),
            bundle("500", None, None),
        ]);
        assert_eq!(overview.average_annual_return_pct, dec!(5));
    }

    #[test]
    fn test_no_accounts() {
        let overview = AccountsOverview::aggregate(&[]);
        assert_eq!(overview, AccountsOverview::default());
    }
}
