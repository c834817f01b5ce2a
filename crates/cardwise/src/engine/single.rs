use crate::catalog::{CatalogSnapshot, CreditCardOffer, CardTier, RewardType};

use super::domain::{
    CardValueResult, CardWarning, RecommendationRequest, RewardPreference, SubscriptionTier,
    WarningKind,
};
use super::intake::{RequestGuard, SpendingProfile};
use super::value::CardValueCalculator;

/// Whether an offer can appear in this caller's results at all.
pub(crate) fn is_eligible(offer: &CreditCardOffer, request: &RecommendationRequest) -> bool {
    if !offer.active || request.owned_cards.contains(&offer.id) {
        return false;
    }

    let type_matches = match request.reward_preference {
        RewardPreference::BestOverall => true,
        RewardPreference::Cashback => offer.reward_type == RewardType::Cashback,
        RewardPreference::Points => offer.reward_type == RewardType::Points,
    };
    if !type_matches {
        return false;
    }

    match request.subscription_tier {
        SubscriptionTier::Premium => true,
        SubscriptionTier::Free => offer.tier == CardTier::Free,
    }
}

/// Ranks every eligible card by first-year net value.
pub struct SingleCardRecommender<'a> {
    guard: &'a RequestGuard,
    calculator: &'a CardValueCalculator,
}

impl<'a> SingleCardRecommender<'a> {
    pub fn new(guard: &'a RequestGuard, calculator: &'a CardValueCalculator) -> Self {
        Self { guard, calculator }
    }

    /// Value and rank the eligible catalog. Cards with contradictory or
    /// incomplete catalog data are dropped and reported as warnings.
    pub fn recommend(
        &self,
        snapshot: &CatalogSnapshot,
        profile: &SpendingProfile,
        request: &RecommendationRequest,
    ) -> (Vec<CardValueResult>, Vec<CardWarning>) {
        let mut results = Vec::new();
        let mut warnings = Vec::new();

        for offer in snapshot
            .offers
            .iter()
            .filter(|offer| is_eligible(offer, request))
        {
            if let Err(error) = self.guard.check_offer(offer, snapshot) {
                warnings.push(CardWarning {
                    card_id: offer.id.clone(),
                    kind: WarningKind::CatalogIntegrity,
                    detail: error.to_string(),
                });
                continue;
            }

            match self.calculator.compute(offer, profile) {
                Ok(result) => results.push(result),
                Err(error) => warnings.push(CardWarning {
                    card_id: offer.id.clone(),
                    kind: WarningKind::Configuration,
                    detail: error.to_string(),
                }),
            }
        }

        // Stable sort keeps catalog order for full ties.
        results.sort_by(|a, b| {
            b.net_annual_value
                .total_cmp(&a.net_annual_value)
                .then(a.annual_fee.total_cmp(&b.annual_fee))
                .then_with(|| a.card_name.cmp(&b.card_name))
        });

        (results, warnings)
    }
}
