//! Upstream payload shapes and the portfolio snapshot built from them.
//!
//! The brokerage API is loose about types: numbers may be strings, lists may be
//! null and most fields are optional. Every field here is optional and numeric
//! fields go through a lenient decoder, so a single odd value never rejects the
//! whole payload.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Error, Result};
use crate::utils::decimal_utils::lenient_decimal;

/// `GET /accounts/{account}/portfolio`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioPayload {
    #[serde(default)]
    pub portfolio: Option<PortfolioSummaryPayload>,
    #[serde(default)]
    pub extra: Option<ExtraPayload>,
    #[serde(default)]
    pub instrument_accounts: Option<Vec<InstrumentAccountPayload>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummaryPayload {
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub total_amount: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub cash_amount: Option<Decimal>,
    #[serde(default)]
    pub cash_accounts: Option<Vec<CashAccountPayload>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashAccountPayload {
    #[serde(default)]
    pub instrument_accounts: Option<Vec<InstrumentAccountPayload>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstrumentAccountPayload {
    #[serde(default)]
    pub positions: Option<Vec<PositionPayload>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionPayload {
    #[serde(default)]
    pub instrument: Option<InstrumentPayload>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub amount: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub weight_real: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub titles: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstrumentPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub identifier: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtraPayload {
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub additional_cash_needed_to_trade: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub amount_to_trade: Option<Decimal>,
}

/// `GET /accounts/{account}/performance`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryPayload {
    #[serde(default)]
    pub performance: Option<PerformancePayload>,
    #[serde(default, rename = "return")]
    pub returns: Option<ReturnPayload>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub plan_expected_return: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub volatility: Option<Decimal>,
    #[serde(default)]
    pub portfolios: Option<Vec<PortfolioHistoryEntry>>,
}

/// Raw performance block. Series stay as JSON until the normalizer reads them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformancePayload {
    #[serde(default)]
    pub period: Option<Value>,
    #[serde(default)]
    pub real: Option<Value>,
    #[serde(default)]
    pub expected: Option<Value>,
    #[serde(default)]
    pub best: Option<Value>,
    #[serde(default)]
    pub worst: Option<Value>,
    #[serde(default)]
    pub expected_return: Option<Value>,
    #[serde(default)]
    pub best_return: Option<Value>,
    #[serde(default)]
    pub worst_return: Option<Value>,
}

impl PerformancePayload {
    pub fn expected_series(&self) -> Option<&Value> {
        self.expected.as_ref().or(self.expected_return.as_ref())
    }

    pub fn best_series(&self) -> Option<&Value> {
        self.best.as_ref().or(self.best_return.as_ref())
    }

    pub fn worst_series(&self) -> Option<&Value> {
        self.worst.as_ref().or(self.worst_return.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnPayload {
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub time_return_annual: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioHistoryEntry {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub total_amount: Option<Decimal>,
}

fn decode_object<T: serde::de::DeserializeOwned>(value: &Value, what: &str) -> Result<T> {
    if !value.is_object() {
        return Err(Error::Payload(format!("{} payload is not a JSON object", what)));
    }
    Ok(serde_json::from_value(value.clone())?)
}

impl PortfolioPayload {
    pub fn from_json(value: &Value) -> Result<Self> {
        decode_object(value, "portfolio")
    }

    pub fn total_value(&self) -> Decimal {
        self.portfolio
            .as_ref()
            .and_then(|p| p.total_amount)
            .unwrap_or(Decimal::ZERO)
    }

    /// Every position, from the top-level instrument accounts and from those
    /// nested under cash accounts.
    pub fn positions(&self) -> impl Iterator<Item = &PositionPayload> + '_ {
        let top_level = self.instrument_accounts.iter().flatten();
        let nested = self
            .portfolio
            .iter()
            .flat_map(|p| p.cash_accounts.iter().flatten())
            .flat_map(|cash| cash.instrument_accounts.iter().flatten());
        top_level
            .chain(nested)
            .flat_map(|account| account.positions.iter().flatten())
    }
}

impl HistoryPayload {
    pub fn from_json(value: &Value) -> Result<Self> {
        decode_object(value, "performance")
    }

    /// The performance block, when it carries a period list.
    pub fn performance_with_periods(&self) -> Option<&PerformancePayload> {
        self.performance.as_ref().filter(|p| p.period.is_some())
    }
}

/// One holding of the portfolio as shown in the composition table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub name: String,
    pub amount: Decimal,
    /// Fraction of the total value (0.25 = 25%).
    pub weight: Decimal,
    pub color: String,
    pub price: Decimal,
    pub units: Decimal,
}

impl Component {
    /// Unit price, when the API reports one.
    pub fn display_price(&self) -> Option<Decimal> {
        Some(self.price).filter(|p| p.is_sign_positive() && !p.is_zero())
    }

    /// Unit count, when the API reports one.
    pub fn display_units(&self) -> Option<Decimal> {
        Some(self.units).filter(|u| u.is_sign_positive() && !u.is_zero())
    }

    pub fn weight_pct(&self) -> Decimal {
        self.weight * Decimal::ONE_HUNDRED
    }
}

/// Live state of one account, rebuilt on every fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    pub total_value: Decimal,
    pub cash_amount: Decimal,
    pub additional_cash_needed: Decimal,
    pub components: Vec<Component>,
}
