//! Property-based tests for the numeric invariants of performance reconstruction.

use folioview_core::portfolio::allocation::decompose;
use folioview_core::portfolio::performance::{extend, ScenarioFactors, SparseSeries};
use folioview_core::portfolio::snapshot::Component;
use folioview_core::portfolio::valuation::reconcile;
use folioview_core::settings::ProjectionBasis;
use proptest::prelude::*;
use rust_decimal::Decimal;

// =============================================================================
// Generators
// =============================================================================

/// Window of 1..24 periods, each observed with a positive cent amount or not.
fn arb_observations() -> impl Strategy<Value = Vec<Option<Decimal>>> {
    proptest::collection::vec(
        proptest::option::of((1i64..100_000_000).prop_map(|cents| Decimal::new(cents, 2))),
        1..24,
    )
}

fn arb_total() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Sparse factors over the first 24 indices.
fn arb_factors() -> impl Strategy<Value = SparseSeries> {
    proptest::collection::btree_map(0usize..24, (-50i64..200).prop_map(|p| Decimal::new(p, 2)), 0..24)
        .prop_map(|map| map.into_iter().collect())
}

fn arb_basis() -> impl Strategy<Value = ProjectionBasis> {
    prop_oneof![
        Just(ProjectionBasis::CumulativeLevel),
        Just(ProjectionBasis::PeriodReturn),
    ]
}

fn to_sparse(observations: &[Option<Decimal>]) -> SparseSeries {
    observations
        .iter()
        .enumerate()
        .filter_map(|(index, value)| value.map(|v| (index, v)))
        .collect()
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The reconciled value at the anchor is the live total, and the anchor is
    /// the most recent observation.
    #[test]
    fn prop_anchor_equals_current_total(
        observations in arb_observations(),
        total in arb_total()
    ) {
        let indices: Vec<usize> = (0..observations.len()).collect();
        let reconciled = reconcile(&to_sparse(&observations), &indices, total);

        match observations.iter().rposition(Option::is_some) {
            Some(last) => {
                prop_assert!(!reconciled.degenerate);
                prop_assert_eq!(reconciled.anchor_position, last);
                prop_assert_eq!(reconciled.values[last], Some(total));
                prop_assert_eq!(reconciled.values.len(), observations.len());
            }
            None => {
                prop_assert!(reconciled.degenerate);
                prop_assert_eq!(reconciled.values, vec![Some(total)]);
            }
        }
    }

    /// Unobserved periods stay unobserved after scaling.
    #[test]
    fn prop_reconcile_preserves_gaps(
        observations in arb_observations(),
        total in arb_total()
    ) {
        let indices: Vec<usize> = (0..observations.len()).collect();
        let reconciled = reconcile(&to_sparse(&observations), &indices, total);
        if !reconciled.degenerate {
            for (observed, value) in observations.iter().zip(&reconciled.values) {
                prop_assert_eq!(observed.is_some(), value.is_some());
            }
        }
    }

    /// Scenarios never diverge from the real series at or before the anchor.
    #[test]
    fn prop_projections_collapse_onto_history(
        observations in arb_observations(),
        total in arb_total(),
        expected in arb_factors(),
        best in arb_factors(),
        worst in arb_factors(),
        basis in arb_basis()
    ) {
        let indices: Vec<usize> = (0..observations.len()).collect();
        let reconciled = reconcile(&to_sparse(&observations), &indices, total);
        let factors = ScenarioFactors { expected, best, worst };
        let projections = extend(&reconciled, &indices, &factors, basis);

        let anchor = reconciled.anchor_position;
        for scenario in [&projections.expected, &projections.best, &projections.worst] {
            prop_assert_eq!(scenario.len(), reconciled.values.len());
            prop_assert_eq!(&scenario[..=anchor], &reconciled.values[..=anchor]);
            prop_assert!(scenario[anchor..].iter().all(Option::is_some));
        }
    }

    /// Each component series is the portfolio series times the component weight.
    #[test]
    fn prop_decomposition_is_linear(
        observations in arb_observations(),
        weight_pct in 0i64..=100
    ) {
        let weight = Decimal::new(weight_pct, 2);
        let component = Component {
            name: "Fund 1".to_string(),
            amount: Decimal::ZERO,
            weight,
            color: "#FF6B6B".to_string(),
            price: Decimal::ZERO,
            units: Decimal::ZERO,
        };
        let decomposed = decompose(std::slice::from_ref(&component), &observations);

        prop_assert_eq!(decomposed.len(), 1);
        for (value, part) in observations.iter().zip(&decomposed[0].values) {
            prop_assert_eq!(value.map(|v| v * weight), *part);
        }
    }
}
