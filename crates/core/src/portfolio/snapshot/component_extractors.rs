//! Ordered fallback chains that derive component names and weights from the
//! optional fields of a position.

use rust_decimal::Decimal;

use super::{Component, PortfolioPayload, PortfolioSnapshot, PositionPayload};
use crate::constants::{COMPONENT_COLOR_PALETTE, FALLBACK_COMPONENT_NAME_PREFIX};

/// What an extractor can look at.
#[derive(Debug, Clone, Copy)]
pub struct PositionContext<'a> {
    pub position: &'a PositionPayload,
    /// Zero-based position of the component in composition order.
    pub ordinal: usize,
    pub total_value: Decimal,
}

pub type Extractor<T> = fn(&PositionContext<'_>) -> Option<T>;

/// Extractors tried in order; the first one that yields a value wins.
pub struct FallbackChain<T> {
    extractors: Vec<(&'static str, Extractor<T>)>,
}

impl<T> Default for FallbackChain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FallbackChain<T> {
    pub fn new() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    pub fn then(mut self, label: &'static str, extractor: Extractor<T>) -> Self {
        self.extractors.push((label, extractor));
        self
    }

    /// The first present value together with the label of the extractor that produced it.
    pub fn resolve_with_source(&self, ctx: &PositionContext<'_>) -> Option<(&'static str, T)> {
        self.extractors
            .iter()
            .find_map(|(label, extract)| extract(ctx).map(|value| (*label, value)))
    }

    pub fn resolve(&self, ctx: &PositionContext<'_>) -> Option<T> {
        self.resolve_with_source(ctx).map(|(_, value)| value)
    }
}

fn non_blank(text: Option<&String>) -> Option<String> {
    text.map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// `instrument.name` -> `instrument.description` -> `instrument.identifier` -> `Fund N`.
pub fn name_chain() -> FallbackChain<String> {
    FallbackChain::new()
        .then("instrument.name", |ctx| {
            non_blank(ctx.position.instrument.as_ref()?.name.as_ref())
        })
        .then("instrument.description", |ctx| {
            non_blank(ctx.position.instrument.as_ref()?.description.as_ref())
        })
        .then("instrument.identifier", |ctx| {
            non_blank(ctx.position.instrument.as_ref()?.identifier.as_ref())
        })
        .then("synthesized", |ctx| {
            Some(format!("{} {}", FALLBACK_COMPONENT_NAME_PREFIX, ctx.ordinal + 1))
        })
}

/// `weight_real` (when non-zero) -> `amount / total_value` -> 0.
pub fn weight_chain() -> FallbackChain<Decimal> {
    FallbackChain::new()
        .then("weight_real", |ctx| {
            ctx.position.weight_real.filter(|w| !w.is_zero())
        })
        .then("amount_share", |ctx| {
            if ctx.total_value <= Decimal::ZERO {
                return None;
            }
            ctx.position
                .amount
                .unwrap_or(Decimal::ZERO)
                .checked_div(ctx.total_value)
        })
        .then("zero", |_| Some(Decimal::ZERO))
}

/// Color assigned to the component at `ordinal`, cycling through the palette.
pub fn component_color(ordinal: usize) -> &'static str {
    COMPONENT_COLOR_PALETTE[ordinal % COMPONENT_COLOR_PALETTE.len()]
}

/// Builds the composition rows of a portfolio payload, in payload order.
pub fn extract_components(payload: &PortfolioPayload) -> Vec<Component> {
    let total_value = payload.total_value();
    let names = name_chain();
    let weights = weight_chain();

    payload
        .positions()
        .enumerate()
        .map(|(ordinal, position)| {
            let ctx = PositionContext {
                position,
                ordinal,
                total_value,
            };
            Component {
                name: names.resolve(&ctx).unwrap_or_default(),
                amount: position.amount.unwrap_or(Decimal::ZERO),
                weight: weights.resolve(&ctx).unwrap_or(Decimal::ZERO),
                color: component_color(ordinal).to_string(),
                price: position.price.unwrap_or(Decimal::ZERO),
                units: position.titles.unwrap_or(Decimal::ZERO),
            }
        })
        .collect()
}

impl PortfolioSnapshot {
    pub fn from_payload(payload: &PortfolioPayload) -> Self {
        let summary = payload.portfolio.as_ref();
        Self {
            total_value: payload.total_value(),
            cash_amount: summary
                .and_then(|p| p.cash_amount)
                .unwrap_or(Decimal::ZERO),
            additional_cash_needed: payload
                .extra
                .as_ref()
                .and_then(|e| e.additional_cash_needed_to_trade)
                .unwrap_or(Decimal::ZERO),
            components: extract_components(payload),
        }
    }
}
