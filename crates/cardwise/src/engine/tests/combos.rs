use super::common::*;
use crate::engine::combos::{CombinationEnumerator, OptimisticProjection};
use crate::engine::value::CardValueCalculator;
use std::collections::HashSet;

#[test]
fn enumerator_yields_all_pairs_then_all_triples() {
    let subsets: Vec<Vec<usize>> = CombinationEnumerator::new(4).collect();

    // C(4,2) + C(4,3) = 6 + 4
    assert_eq!(subsets.len(), 10);
    assert!(subsets[..6].iter().all(|subset| subset.len() == 2));
    assert!(subsets[6..].iter().all(|subset| subset.len() == 3));

    let unique: HashSet<Vec<usize>> = subsets.iter().cloned().collect();
    assert_eq!(unique.len(), subsets.len());

    for subset in &subsets {
        assert!(subset.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(subset.iter().all(|&index| index < 4));
    }
}

#[test]
fn enumerator_handles_exactly_two_cards() {
    let subsets: Vec<Vec<usize>> = CombinationEnumerator::new(2).collect();
    assert_eq!(subsets, vec![vec![0, 1]]);
}

#[test]
fn enumerator_is_empty_below_two_cards() {
    assert_eq!(CombinationEnumerator::new(1).count(), 0);
    assert_eq!(CombinationEnumerator::new(0).count(), 0);
}

#[test]
fn upper_bound_dominates_the_actual_strategy_value() {
    let mut dining = cashback_card("dining", "Dining Card", 95.0, 0.01);
    dining.rules = vec![capped_rule(
        "dining",
        0.05,
        100.0,
        Some(crate::catalog::RewardPeriod::Yearly),
    )];
    dining.benefits = vec![benefit("credit", "Credit", 50.0)];
    let travel = cashback_card("travel", "Travel Card", 0.0, 0.02);

    let offers = vec![&dining, &travel];
    let calculator = CardValueCalculator::new(Default::default(), None, &[]);
    let extras: Vec<f64> = offers
        .iter()
        .map(|offer| {
            calculator.benefits_component(offer)
                + calculator.signup_component(offer).expect("valuable")
        })
        .collect();

    let spending = profile(vec![entry("dining", 500.0), entry("travel", 300.0)]);
    let projection = OptimisticProjection::new(&offers, &spending, extras);

    let optimizer = crate::engine::allocation::CategoryAllocationOptimizer::new(&calculator);
    let strategy = optimizer
        .optimize(&[&dining, &travel], &spending)
        .expect("valuable subset");

    // The bound ignores caps and fees, so it can only overshoot.
    assert!(projection.upper_bound(&[0, 1]) >= strategy.total_net_annual_value);
}
