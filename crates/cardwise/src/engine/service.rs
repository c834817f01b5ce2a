use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::CreditCardOffer;

use super::allocation::CategoryAllocationOptimizer;
use super::combos::{
    CombinationEnumerator, OptimisticProjection, BRUTE_FORCE_CATALOG_LIMIT, PRUNE_SAFETY_MARGIN,
};
use super::domain::{CardValueResult, CardWarning, MultiCardStrategy, RecommendationRequest, WarningKind};
use super::intake::{RequestGuard, ValidationError};
use super::ranking::StrategyRanker;
use super::single::{is_eligible, SingleCardRecommender};
use super::source::{CatalogSource, CatalogSourceError};
use super::value::CardValueCalculator;

const DEFAULT_CARD_LIMIT: usize = 10;
const DEFAULT_STRATEGY_LIMIT: usize = 5;

/// Single-card recommendation response: ranked results plus any soft
/// failures encountered along the way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRecommendations {
    pub as_of: NaiveDate,
    pub results: Vec<CardValueResult>,
    pub warnings: Vec<CardWarning>,
}

/// Multi-card recommendation response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyRecommendations {
    pub as_of: NaiveDate,
    pub strategies: Vec<MultiCardStrategy>,
    pub warnings: Vec<CardWarning>,
}

/// Hard failures for a recommendation call. Soft per-card failures never
/// appear here; they ride along as warnings in the response.
#[derive(Debug, thiserror::Error)]
pub enum RecommendationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Catalog(#[from] CatalogSourceError),
}

/// Facade composing the request guard, calculator, recommender, combination
/// search, allocator, and ranker over a catalog source. Every call takes a
/// fresh snapshot; the service itself carries no mutable state.
pub struct RecommendationService<C> {
    source: Arc<C>,
    guard: RequestGuard,
}

impl<C: CatalogSource> RecommendationService<C> {
    pub fn new(source: Arc<C>) -> Self {
        Self {
            source,
            guard: RequestGuard::new(),
        }
    }

    /// Rank individual cards by first-year net value for this request.
    pub fn recommend_cards(
        &self,
        request: &RecommendationRequest,
    ) -> Result<CardRecommendations, RecommendationError> {
        let snapshot = self.source.snapshot()?;
        let profile = self.guard.sanitize(request, &snapshot)?;
        let calculator = CardValueCalculator::new(
            request.preferences,
            request.point_value_override,
            &request.benefit_valuations,
        );

        let recommender = SingleCardRecommender::new(&self.guard, &calculator);
        let (mut results, warnings) = recommender.recommend(&snapshot, &profile, request);
        results.truncate(request.limit.unwrap_or(DEFAULT_CARD_LIMIT));

        tracing::debug!(
            ranked = results.len(),
            dropped = warnings.len(),
            "single-card recommendation computed"
        );

        Ok(CardRecommendations {
            as_of: snapshot.as_of,
            results,
            warnings,
        })
    }

    /// Find the best 2–3 card combinations with per-category assignment.
    pub fn recommend_strategies(
        &self,
        request: &RecommendationRequest,
    ) -> Result<StrategyRecommendations, RecommendationError> {
        let snapshot = self.source.snapshot()?;
        let profile = self.guard.sanitize(request, &snapshot)?;
        let calculator = CardValueCalculator::new(
            request.preferences,
            request.point_value_override,
            &request.benefit_valuations,
        );

        // Vet eligible cards up front so the subset search never trips over
        // a card-level failure mid-enumeration.
        let mut warnings = Vec::new();
        let mut cards: Vec<&CreditCardOffer> = Vec::new();
        let mut extras: Vec<f64> = Vec::new();
        for offer in snapshot
            .offers
            .iter()
            .filter(|offer| is_eligible(offer, request))
        {
            if let Err(error) = self.guard.check_offer(offer, &snapshot) {
                warnings.push(CardWarning {
                    card_id: offer.id.clone(),
                    kind: WarningKind::CatalogIntegrity,
                    detail: error.to_string(),
                });
                continue;
            }
            match calculator.signup_component(offer) {
                Ok(signup) => {
                    extras.push(signup + calculator.benefits_component(offer));
                    cards.push(offer);
                }
                Err(error) => warnings.push(CardWarning {
                    card_id: offer.id.clone(),
                    kind: WarningKind::Configuration,
                    detail: error.to_string(),
                }),
            }
        }

        let projection = if cards.len() > BRUTE_FORCE_CATALOG_LIMIT {
            Some(OptimisticProjection::new(&cards, &profile, extras))
        } else {
            None
        };

        let optimizer = CategoryAllocationOptimizer::new(&calculator);
        let mut strategies = Vec::new();
        let mut leader = f64::NEG_INFINITY;
        for subset_indices in CombinationEnumerator::new(cards.len()) {
            if let Some(projection) = &projection {
                if projection.upper_bound(&subset_indices) <= leader - PRUNE_SAFETY_MARGIN {
                    continue;
                }
            }

            let subset: Vec<&CreditCardOffer> = subset_indices
                .iter()
                .map(|&index| cards[index])
                .collect();
            match optimizer.optimize(&subset, &profile) {
                Ok(strategy) => {
                    leader = leader.max(strategy.total_net_annual_value);
                    strategies.push(strategy);
                }
                // Signup conversion was vetted above, so this does not fire.
                Err(error) => tracing::debug!(%error, "skipping unvaluable subset"),
            }
        }

        let strategies =
            StrategyRanker::rank(strategies, request.limit.unwrap_or(DEFAULT_STRATEGY_LIMIT));

        tracing::debug!(
            candidates = cards.len(),
            ranked = strategies.len(),
            dropped = warnings.len(),
            "multi-card strategies computed"
        );

        Ok(StrategyRecommendations {
            as_of: snapshot.as_of,
            strategies,
            warnings,
        })
    }
}
