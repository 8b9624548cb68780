//! Allocation models for the per-component value breakdown.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Value series of a single component over the display window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSeries {
    /// Display name of the component
    pub name: String,
    /// Color for visualization (hex code)
    pub color: String,
    /// Weight applied to the portfolio series
    pub weight: Decimal,
    /// One value per period; `None` where the portfolio series is unobserved
    pub values: Vec<Option<Decimal>>,
}

impl ComponentSeries {
    /// Whether any period carries a value. Series without observations are
    /// still returned; it is up to the caller to hide them.
    pub fn has_observations(&self) -> bool {
        self.values.iter().any(Option::is_some)
    }

    /// First observed value, used as the base of percentage charts.
    pub fn first_observed(&self) -> Option<Decimal> {
        self.values.iter().flatten().next().copied()
    }
}
