use std::sync::Arc;

use super::common::*;
use crate::catalog::CardId;
use crate::engine::domain::{CategoryAllocation, MultiCardStrategy, WarningKind};
use crate::engine::intake::ValidationError;
use crate::engine::ranking::StrategyRanker;
use crate::engine::service::{RecommendationError, RecommendationService};
use crate::engine::source::CatalogSourceError;

fn service(
    offers: Vec<crate::catalog::CreditCardOffer>,
) -> RecommendationService<FixedCatalog> {
    RecommendationService::new(Arc::new(FixedCatalog::new(snapshot(offers))))
}

#[test]
fn recommend_cards_ranks_the_catalog() {
    let mut dining = cashback_card("dining", "Dining Card", 0.0, 0.01);
    dining.rules = vec![rule("dining", 0.04)];
    let flat = cashback_card("flat", "Flat Card", 0.0, 0.02);

    let recommendations = service(vec![flat, dining])
        .recommend_cards(&request(vec![entry("dining", 200.0)]))
        .expect("recommendation succeeds");

    assert_eq!(recommendations.as_of, snapshot(Vec::new()).as_of);
    assert!(recommendations.warnings.is_empty());
    let ids: Vec<&str> = recommendations
        .results
        .iter()
        .map(|result| result.card_id.0.as_str())
        .collect();
    assert_eq!(ids, vec!["dining", "flat"]);
    assert_eq!(recommendations.results[0].gross_reward_value, 96.0);
}

#[test]
fn recommend_cards_honors_the_result_limit() {
    let offers = (0..6)
        .map(|index| cashback_card(&format!("card-{index}"), &format!("Card {index}"), 0.0, 0.01))
        .collect();

    let mut request = request(vec![entry("dining", 100.0)]);
    request.limit = Some(3);

    let recommendations = service(offers)
        .recommend_cards(&request)
        .expect("recommendation succeeds");

    assert_eq!(recommendations.results.len(), 3);
}

#[test]
fn negative_spend_fails_validation_before_any_computation() {
    let error = service(vec![cashback_card("c", "Card", 0.0, 0.01)])
        .recommend_cards(&request(vec![entry("dining", -5.0)]))
        .expect_err("negative spend is invalid");

    assert!(matches!(
        error,
        RecommendationError::Validation(ValidationError::NegativeSpend { .. })
    ));
}

#[test]
fn unknown_category_fails_validation() {
    let error = service(vec![cashback_card("c", "Card", 0.0, 0.01)])
        .recommend_cards(&request(vec![entry("yachts", 100.0)]))
        .expect_err("unknown category is invalid");

    assert!(matches!(
        error,
        RecommendationError::Validation(ValidationError::UnknownCategory(_))
    ));
}

#[test]
fn duplicate_spending_entries_fail_validation() {
    let error = service(vec![cashback_card("c", "Card", 0.0, 0.01)])
        .recommend_cards(&request(vec![entry("dining", 100.0), entry("dining", 50.0)]))
        .expect_err("duplicate entry is invalid");

    assert!(matches!(
        error,
        RecommendationError::Validation(ValidationError::DuplicateEntry { .. })
    ));
}

#[test]
fn unavailable_catalog_is_a_hard_error() {
    let service = RecommendationService::new(Arc::new(UnavailableCatalog));

    let error = service
        .recommend_cards(&request(vec![entry("dining", 100.0)]))
        .expect_err("catalog is offline");

    assert!(matches!(
        error,
        RecommendationError::Catalog(CatalogSourceError::Unavailable(_))
    ));
}

#[test]
fn best_pair_combines_complementary_category_strengths() {
    let mut dining = cashback_card("dining", "Dining Card", 0.0, 0.005);
    dining.rules = vec![rule("dining", 0.05)];
    let mut travel = cashback_card("travel", "Travel Card", 0.0, 0.005);
    travel.rules = vec![rule("travel", 0.04)];
    let flat = cashback_card("flat", "Flat Card", 0.0, 0.02);

    let strategies = service(vec![dining, travel, flat])
        .recommend_strategies(&request(vec![entry("dining", 300.0), entry("travel", 300.0)]))
        .expect("strategies compute");

    let best = &strategies.strategies[0];
    assert_eq!(
        best.card_ids,
        vec![CardId("dining".to_string()), CardId("travel".to_string())]
    );
    // dining 300*0.05*12 = 180, travel 300*0.04*12 = 144.
    assert_eq!(best.total_net_annual_value, 324.0);

    let dining_allocation = best
        .allocations
        .iter()
        .find(|allocation| allocation.category == "dining")
        .expect("dining allocated");
    assert_eq!(dining_allocation.card_id, CardId("dining".to_string()));
    assert_eq!(dining_allocation.annual_value, 180.0);
}

#[test]
fn equal_value_strategies_prefer_fewer_cards() {
    let mut dining = cashback_card("dining", "Dining Card", 0.0, 0.005);
    dining.rules = vec![rule("dining", 0.05)];
    let mut travel = cashback_card("travel", "Travel Card", 0.0, 0.005);
    travel.rules = vec![rule("travel", 0.04)];
    // Contributes nothing anywhere, so the triple ties the pair.
    let idle = cashback_card("idle", "Idle Card", 0.0, 0.001);

    let strategies = service(vec![dining, travel, idle])
        .recommend_strategies(&request(vec![entry("dining", 300.0), entry("travel", 300.0)]))
        .expect("strategies compute");

    assert_eq!(strategies.strategies[0].card_count(), 2);
    assert_eq!(
        strategies.strategies[0].total_net_annual_value,
        strategies.strategies[1].total_net_annual_value
    );
}

#[test]
fn strategy_warnings_surface_alongside_results() {
    let mut broken = cashback_card("broken", "Broken", 0.0, 0.06);
    broken.rules = vec![sub_rule("dining", "flights", 0.1)];
    let card_a = cashback_card("a", "A", 0.0, 0.02);
    let card_b = cashback_card("b", "B", 0.0, 0.01);

    let strategies = service(vec![broken, card_a, card_b])
        .recommend_strategies(&request(vec![entry("dining", 100.0)]))
        .expect("strategies compute");

    assert_eq!(strategies.warnings.len(), 1);
    assert_eq!(strategies.warnings[0].kind, WarningKind::CatalogIntegrity);
    assert!(!strategies.strategies.is_empty());
    assert!(strategies.strategies.iter().all(|strategy| {
        !strategy
            .card_ids
            .contains(&CardId("broken".to_string()))
    }));
}

#[test]
fn strategy_limit_truncates_the_ranked_list() {
    let offers = (0..5)
        .map(|index| cashback_card(&format!("card-{index}"), &format!("Card {index}"), 0.0, 0.01))
        .collect();

    let mut request = request(vec![entry("dining", 100.0)]);
    request.limit = Some(1);

    let strategies = service(offers)
        .recommend_strategies(&request)
        .expect("strategies compute");

    assert_eq!(strategies.strategies.len(), 1);
}

#[test]
fn ranker_breaks_net_value_ties_on_fees_then_card_count() {
    fn strategy(ids: &[&str], net: f64, fees: f64) -> MultiCardStrategy {
        MultiCardStrategy {
            card_ids: ids.iter().map(|id| CardId((*id).to_string())).collect(),
            allocations: Vec::<CategoryAllocation>::new(),
            gross_reward_value: net,
            benefits_value: 0.0,
            signup_bonus_value: 0.0,
            total_annual_fees: fees,
            total_net_annual_value: net,
        }
    }

    let ranked = StrategyRanker::rank(
        vec![
            strategy(&["a", "b", "c"], 100.0, 0.0),
            strategy(&["a", "b"], 100.0, 0.0),
            strategy(&["c", "d"], 100.0, 50.0),
            strategy(&["e", "f"], 250.0, 95.0),
        ],
        10,
    );

    assert_eq!(ranked[0].card_ids[0], CardId("e".to_string()));
    assert_eq!(ranked[1].card_ids, vec![CardId("a".to_string()), CardId("b".to_string())]);
    assert_eq!(ranked[2].card_count(), 3);
    assert_eq!(ranked[3].total_annual_fees, 50.0);
}
