//! The reward valuation and optimization engine.
//!
//! Pure request/response computation: a [`RecommendationService`] takes a
//! catalog snapshot and a validated spending profile and produces either a
//! ranked list of single cards or the best 2–3 card strategies with
//! per-category assignment. No module here holds mutable state between
//! calls.

pub mod allocation;
pub mod combos;
pub mod domain;
pub mod intake;
pub mod ranking;
pub mod resolver;
pub mod router;
pub mod service;
pub mod single;
pub mod source;
pub mod value;

#[cfg(test)]
mod tests;

pub use allocation::CategoryAllocationOptimizer;
pub use combos::{CombinationEnumerator, BRUTE_FORCE_CATALOG_LIMIT};
pub use domain::{
    BenefitValuation, CalculationMode, CalculationPreferences, CardValueResult, CardWarning,
    CategoryAllocation, CategoryValue, MultiCardStrategy, RecommendationRequest, RewardPreference,
    SpendingEntry, SubscriptionTier, WarningKind,
};
pub use intake::{IntegrityError, RequestGuard, SpendingProfile, ValidationError};
pub use ranking::StrategyRanker;
pub use resolver::{RateQuote, RateSource, RewardRuleResolver};
pub use router::recommendation_router;
pub use service::{
    CardRecommendations, RecommendationError, RecommendationService, StrategyRecommendations,
};
pub use single::SingleCardRecommender;
pub use source::{CatalogSource, CatalogSourceError};
pub use value::{CardValueCalculator, ValuationError};
