//! Chart datasets, value scales and the single-instance chart slot.

use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::constants::{
    BEST_SERIES_COLOR, CURRENCY_SYMBOL, EXPECTED_SERIES_COLOR, PERCENT_DECIMAL_PRECISION,
    REAL_SERIES_COLOR, WORST_SERIES_COLOR,
};
use crate::errors::Error;
use crate::portfolio::allocation::ComponentSeries;
use crate::portfolio::performance::PerformanceSeries;

/// Unit of the y axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartScale {
    #[default]
    Currency,
    /// Change relative to a base value, in percent.
    Percentage,
}

impl FromStr for ChartScale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "currency" | "value" => Ok(Self::Currency),
            "percentage" | "percent" => Ok(Self::Percentage),
            other => Err(Error::InvalidConfigValue(format!(
                "unknown chart scale '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub color: String,
    /// Projections are drawn dashed.
    pub dashed: bool,
    pub values: Vec<Option<Decimal>>,
}

impl ChartDataset {
    pub fn new(label: impl Into<String>, color: impl Into<String>, dashed: bool, values: Vec<Option<Decimal>>) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
            dashed,
            values,
        }
    }

    /// Value at the first position, observed or not.
    pub fn first_value(&self) -> Option<Decimal> {
        self.values.first().copied().flatten()
    }

    pub fn first_observed(&self) -> Option<Decimal> {
        self.values.iter().flatten().next().copied()
    }

    /// Same dataset with every value expressed as a change against `base`.
    /// Without a usable base every value becomes `None`.
    pub fn to_percentage(&self, base: Option<Decimal>) -> Self {
        let values = self
            .values
            .iter()
            .map(|value| match (value, base) {
                (Some(value), Some(base)) => percentage_change(*value, base),
                _ => None,
            })
            .collect();
        Self {
            values,
            ..self.clone()
        }
    }
}

/// `(value - base) / base * 100`, or `None` when `base` is zero.
pub fn percentage_change(value: Decimal, base: Decimal) -> Option<Decimal> {
    (value - base)
        .checked_div(base)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|pct| pct.round_dp(PERCENT_DECIMAL_PRECISION))
}

fn currency_label(name: &str) -> String {
    format!("{} ({})", name, CURRENCY_SYMBOL)
}

/// Real line plus the three scenarios. Empty projections are left out.
pub fn portfolio_datasets(series: &PerformanceSeries) -> Vec<ChartDataset> {
    let mut datasets = Vec::with_capacity(4);
    if !series.real.is_empty() {
        datasets.push(ChartDataset::new(
            currency_label("Real"),
            REAL_SERIES_COLOR,
            false,
            series.real.clone(),
        ));
    }
    let scenarios = [
        ("Expected", EXPECTED_SERIES_COLOR, &series.projections.expected),
        ("Best case", BEST_SERIES_COLOR, &series.projections.best),
        ("Worst case", WORST_SERIES_COLOR, &series.projections.worst),
    ];
    for (name, color, values) in scenarios {
        if !values.is_empty() {
            datasets.push(ChartDataset::new(currency_label(name), color, true, values.clone()));
        }
    }
    datasets
}

/// One dataset per component that has at least one observed value.
pub fn component_datasets(series: &[ComponentSeries]) -> Vec<ChartDataset> {
    series
        .iter()
        .filter(|component| component.has_observations())
        .map(|component| {
            ChartDataset::new(
                currency_label(&component.name),
                component.color.clone(),
                false,
                component.values.clone(),
            )
        })
        .collect()
}

/// Portfolio chart in `scale`. Percentages share one base: the first value of
/// the first dataset.
pub fn scale_portfolio(datasets: &[ChartDataset], scale: ChartScale) -> Vec<ChartDataset> {
    match scale {
        ChartScale::Currency => datasets.to_vec(),
        ChartScale::Percentage => {
            let base = datasets.first().and_then(ChartDataset::first_value);
            datasets.iter().map(|d| d.to_percentage(base)).collect()
        }
    }
}

/// Component chart in `scale`. Each dataset is relative to its own first
/// observed value.
pub fn scale_components(datasets: &[ChartDataset], scale: ChartScale) -> Vec<ChartDataset> {
    match scale {
        ChartScale::Currency => datasets.to_vec(),
        ChartScale::Percentage => datasets
            .iter()
            .map(|d| d.to_percentage(d.first_observed()))
            .collect(),
    }
}

/// Everything needed to draw one chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
    pub scale: ChartScale,
}

/// A drawn chart bound to one canvas.
pub trait ChartInstance {
    fn canvas_id(&self) -> &str;

    /// Releases whatever the chart holds. Called exactly once per instance.
    fn destroy(&mut self);
}

/// Owns at most one live chart for a canvas.
///
/// Installing a chart tears down the previous one before the new one becomes
/// live. Dropping the slot tears down the live chart.
pub struct ChartSlot<C: ChartInstance> {
    canvas_id: String,
    live: Option<C>,
}

impl<C: ChartInstance> ChartSlot<C> {
    pub fn new(canvas_id: impl Into<String>) -> Self {
        Self {
            canvas_id: canvas_id.into(),
            live: None,
        }
    }

    pub fn canvas_id(&self) -> &str {
        &self.canvas_id
    }

    pub fn install(&mut self, chart: C) -> &C {
        self.teardown();
        debug!("Installing chart on canvas '{}'", self.canvas_id);
        self.live.insert(chart)
    }

    pub fn get(&self) -> Option<&C> {
        self.live.as_ref()
    }

    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    pub fn clear(&mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if let Some(mut previous) = self.live.take() {
            debug!("Destroying chart on canvas '{}'", previous.canvas_id());
            previous.destroy();
        }
    }
}

impl<C: ChartInstance> Drop for ChartSlot<C> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<C: ChartInstance + std::fmt::Debug> std::fmt::Debug for ChartSlot<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartSlot")
            .field("canvas_id", &self.canvas_id)
            .field("live", &self.live)
            .finish()
    }
}
