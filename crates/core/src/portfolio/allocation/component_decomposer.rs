use log::debug;
use rust_decimal::Decimal;

use super::ComponentSeries;
use crate::portfolio::snapshot::Component;

/// Splits the portfolio value series across components by weight.
///
/// Each component gets `series[i] * weight` at every position, with `None`
/// kept wherever the portfolio series is `None`. Every component is returned,
/// including those whose series ends up entirely unobserved.
pub fn decompose(components: &[Component], series: &[Option<Decimal>]) -> Vec<ComponentSeries> {
    components
        .iter()
        .map(|component| {
            let values = series
                .iter()
                .map(|value| value.and_then(|v| v.checked_mul(component.weight)))
                .collect();
            let decomposed = ComponentSeries {
                name: component.name.clone(),
                color: component.color.clone(),
                weight: component.weight,
                values,
            };
            if !decomposed.has_observations() {
                debug!("Component '{}' has no observed values", component.name);
            }
            decomposed
        })
        .collect()
}
