use crate::catalog::CardId;
use serde::{Deserialize, Serialize};

/// One line of the user's declared spending profile. Categories the user
/// does not list are treated as zero spend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingEntry {
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    pub monthly_spend: f64,
}

/// Which reward currency the user wants recommendations restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardPreference {
    Cashback,
    Points,
    BestOverall,
}

impl RewardPreference {
    pub const fn label(self) -> &'static str {
        match self {
            RewardPreference::Cashback => "cashback",
            RewardPreference::Points => "points",
            RewardPreference::BestOverall => "best_overall",
        }
    }
}

/// Caller subscription tier; free-tier callers only see free-tier cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    Free,
    Premium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMode {
    /// Honor the individual inclusion flags.
    Comprehensive,
    /// Reward value only; fees, benefits, and signup bonuses are all ignored.
    Simple,
}

/// Knobs controlling which value components enter the net figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationPreferences {
    pub include_annual_fees: bool,
    pub include_benefits: bool,
    pub include_signup_bonuses: bool,
    pub mode: CalculationMode,
}

impl Default for CalculationPreferences {
    fn default() -> Self {
        Self {
            include_annual_fees: true,
            include_benefits: true,
            include_signup_bonuses: true,
            mode: CalculationMode::Comprehensive,
        }
    }
}

impl CalculationPreferences {
    /// Flags after applying the calculation mode. Simple mode collapses
    /// everything but raw reward value.
    pub fn effective(self) -> EffectiveInclusions {
        match self.mode {
            CalculationMode::Comprehensive => EffectiveInclusions {
                annual_fees: self.include_annual_fees,
                benefits: self.include_benefits,
                signup_bonuses: self.include_signup_bonuses,
            },
            CalculationMode::Simple => EffectiveInclusions {
                annual_fees: false,
                benefits: false,
                signup_bonuses: false,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveInclusions {
    pub annual_fees: bool,
    pub benefits: bool,
    pub signup_bonuses: bool,
}

/// User override of a benefit's worth, superseding the catalog value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitValuation {
    pub benefit_id: String,
    pub personal_value: f64,
}

/// Full input contract for one recommendation computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub spending: Vec<SpendingEntry>,
    #[serde(default)]
    pub preferences: CalculationPreferences,
    pub reward_preference: RewardPreference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_value_override: Option<f64>,
    #[serde(default)]
    pub benefit_valuations: Vec<BenefitValuation>,
    #[serde(default)]
    pub owned_cards: Vec<CardId>,
    pub subscription_tier: SubscriptionTier,
    /// Maximum number of results to return; defaults per endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

/// Annualized, cap-adjusted value one category contributes on one card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryValue {
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    pub rate: f64,
    pub annual_value: f64,
    pub capped: bool,
}

/// Computed first-year value of a single card against a spending profile.
/// Created fresh per computation; never stored by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardValueResult {
    pub card_id: CardId,
    pub card_name: String,
    pub gross_reward_value: f64,
    pub benefits_value: f64,
    pub signup_bonus_value: f64,
    pub annual_fee: f64,
    pub net_annual_value: f64,
    pub breakdown: Vec<CategoryValue>,
}

/// Assignment of one spending category to one card of a strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAllocation {
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    pub card_id: CardId,
    pub annual_value: f64,
}

/// A 2–3 card combination with its per-category assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiCardStrategy {
    pub card_ids: Vec<CardId>,
    pub allocations: Vec<CategoryAllocation>,
    pub gross_reward_value: f64,
    pub benefits_value: f64,
    pub signup_bonus_value: f64,
    pub total_annual_fees: f64,
    pub total_net_annual_value: f64,
}

impl MultiCardStrategy {
    pub fn card_count(&self) -> usize {
        self.card_ids.len()
    }
}

/// Why a card was dropped from a result set instead of failing the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    Configuration,
    CatalogIntegrity,
}

impl WarningKind {
    pub const fn label(self) -> &'static str {
        match self {
            WarningKind::Configuration => "configuration",
            WarningKind::CatalogIntegrity => "catalog_integrity",
        }
    }
}

/// Soft failure reported alongside valid results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardWarning {
    pub card_id: CardId,
    pub kind: WarningKind,
    pub detail: String,
}
