//! Forward projection of the expected, best-case and worst-case scenarios.
//!
//! Up to the anchor every scenario equals the reconciled real series. Past the
//! anchor each scenario walks forward from the anchor value; a period without
//! a factor keeps the previous value unchanged.

use log::debug;
use rust_decimal::Decimal;

use super::{Projections, ScenarioFactors, SparseSeries};
use crate::portfolio::valuation::Reconciliation;
use crate::settings::ProjectionBasis;

/// Extends the three scenarios over the windowed periods.
///
/// `period_indices` are the original indices of the windowed periods and must
/// be aligned with `reconciled.values`. A degenerate reconciliation yields the
/// single fallback point for every scenario.
pub fn extend(
    reconciled: &Reconciliation,
    period_indices: &[usize],
    factors: &ScenarioFactors,
    basis: ProjectionBasis,
) -> Projections {
    if reconciled.degenerate {
        return Projections {
            expected: reconciled.values.clone(),
            best: reconciled.values.clone(),
            worst: reconciled.values.clone(),
        };
    }

    Projections {
        expected: extend_scenario(reconciled, period_indices, &factors.expected, basis),
        best: extend_scenario(reconciled, period_indices, &factors.best, basis),
        worst: extend_scenario(reconciled, period_indices, &factors.worst, basis),
    }
}

fn extend_scenario(
    reconciled: &Reconciliation,
    period_indices: &[usize],
    factors: &SparseSeries,
    basis: ProjectionBasis,
) -> Vec<Option<Decimal>> {
    let anchor = reconciled.anchor_position;
    let mut projected: Vec<Option<Decimal>> = reconciled.values.clone();

    let Some(anchor_value) = reconciled.anchor_value() else {
        return projected;
    };
    let anchor_index = period_indices.get(anchor).copied();

    match basis {
        ProjectionBasis::CumulativeLevel => {
            let initial_level = anchor_index
                .and_then(|index| factors.get(index))
                .filter(|level| !level.is_zero())
                .or_else(|| reconciled.anchor_raw_value().filter(|raw| !raw.is_zero()));
            if initial_level.is_none() {
                debug!("No initial level at anchor {}; holding projections flat", anchor);
            }

            let mut previous = anchor_value;
            for position in (anchor + 1)..projected.len() {
                let level = period_indices
                    .get(position)
                    .and_then(|index| factors.get(*index));
                if let (Some(initial), Some(level)) = (initial_level, level) {
                    if let Some(value) = anchor_value
                        .checked_mul(level)
                        .and_then(|scaled| scaled.checked_div(initial))
                    {
                        previous = value;
                    }
                }
                projected[position] = Some(previous);
            }
        }
        ProjectionBasis::PeriodReturn => {
            let mut cumulative = anchor_value;
            for position in (anchor + 1)..projected.len() {
                let rate = period_indices
                    .get(position)
                    .and_then(|index| factors.get(*index));
                if let Some(rate) = rate {
                    if let Some(value) = cumulative.checked_mul(Decimal::ONE + rate) {
                        cumulative = value;
                    }
                }
                projected[position] = Some(cumulative);
            }
        }
    }

    projected
}
