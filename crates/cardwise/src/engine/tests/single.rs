use super::common::*;
use crate::catalog::{CardId, CardTier};
use crate::engine::domain::{RewardPreference, SubscriptionTier, WarningKind};
use crate::engine::intake::RequestGuard;
use crate::engine::single::SingleCardRecommender;
use crate::engine::value::CardValueCalculator;

fn recommend(
    offers: Vec<crate::catalog::CreditCardOffer>,
    request: &crate::engine::domain::RecommendationRequest,
) -> (
    Vec<crate::engine::domain::CardValueResult>,
    Vec<crate::engine::domain::CardWarning>,
) {
    let snapshot = snapshot(offers);
    let guard = RequestGuard::new();
    let calculator = CardValueCalculator::new(
        request.preferences,
        request.point_value_override,
        &request.benefit_valuations,
    );
    let profile = guard.sanitize(request, &snapshot).expect("valid request");
    SingleCardRecommender::new(&guard, &calculator).recommend(&snapshot, &profile, request)
}

#[test]
fn inactive_and_owned_cards_are_excluded() {
    let mut inactive = cashback_card("inactive", "Inactive", 0.0, 0.05);
    inactive.active = false;
    let owned = cashback_card("owned", "Owned", 0.0, 0.04);
    let fresh = cashback_card("fresh", "Fresh", 0.0, 0.01);

    let mut request = request(vec![entry("dining", 100.0)]);
    request.owned_cards = vec![CardId("owned".to_string())];

    let (results, warnings) = recommend(vec![inactive, owned, fresh], &request);

    assert!(warnings.is_empty());
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].card_id, CardId("fresh".to_string()));
}

#[test]
fn reward_preference_filters_by_type_unless_best_overall() {
    let cash = cashback_card("cash", "Cash", 0.0, 0.02);
    let points = points_card("pts", "Points", 0.0, 0.015, Some(0.01));

    let mut cashback_only = request(vec![entry("dining", 100.0)]);
    cashback_only.reward_preference = RewardPreference::Cashback;
    let (results, _) = recommend(vec![cash.clone(), points.clone()], &cashback_only);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].card_id, CardId("cash".to_string()));

    let best_overall = request(vec![entry("dining", 100.0)]);
    let (results, _) = recommend(vec![cash, points], &best_overall);
    assert_eq!(results.len(), 2);
}

#[test]
fn free_tier_callers_only_see_free_cards() {
    let mut premium = cashback_card("premium", "Premium", 0.0, 0.06);
    premium.tier = CardTier::Premium;
    let free = cashback_card("free", "Free", 0.0, 0.01);

    let mut request = request(vec![entry("dining", 100.0)]);
    request.subscription_tier = SubscriptionTier::Free;

    let (results, _) = recommend(vec![premium, free], &request);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].card_id, CardId("free".to_string()));
}

#[test]
fn ranking_is_net_value_descending_with_fee_and_name_tie_breaks() {
    let big = cashback_card("big", "Big Earner", 0.0, 0.05);
    // Same net value, different fees: gross 36 - fee 12 = 24 vs plain 2%.
    let mut fee_card = cashback_card("fee", "Fee Card", 12.0, 0.03);
    fee_card.name = "Fee Card".to_string();
    let cheap = cashback_card("cheap", "Cheap Card", 0.0, 0.02);
    // Full tie with `cheap` except the name.
    let alpha = cashback_card("alpha", "Alpha Card", 0.0, 0.02);

    let (results, _) = recommend(
        vec![big, fee_card, cheap, alpha],
        &request(vec![entry("dining", 100.0)]),
    );

    let ids: Vec<&str> = results.iter().map(|result| result.card_id.0.as_str()).collect();
    assert_eq!(ids, vec!["big", "alpha", "cheap", "fee"]);
}

#[test]
fn integrity_violations_drop_the_card_with_a_warning() {
    let mut broken = cashback_card("broken", "Broken", 0.0, 0.05);
    // "flights" belongs to travel, not dining.
    broken.rules = vec![sub_rule("dining", "flights", 0.1)];
    let healthy = cashback_card("healthy", "Healthy", 0.0, 0.01);

    let (results, warnings) = recommend(
        vec![broken, healthy],
        &request(vec![entry("dining", 100.0)]),
    );

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].card_id, CardId("healthy".to_string()));
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].kind, WarningKind::CatalogIntegrity);
    assert_eq!(warnings[0].card_id, CardId("broken".to_string()));
}

#[test]
fn missing_point_value_drops_only_that_card() {
    let mut unvaluable = points_card("pts", "No Point Value", 0.0, 0.02, None);
    unvaluable.signup_bonus = Some(signup(50_000.0));
    let healthy = cashback_card("healthy", "Healthy", 0.0, 0.01);

    let (results, warnings) = recommend(
        vec![unvaluable, healthy],
        &request(vec![entry("dining", 100.0)]),
    );

    assert_eq!(results.len(), 1);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].kind, WarningKind::Configuration);
    assert!(warnings[0].detail.contains("point value"));
}
