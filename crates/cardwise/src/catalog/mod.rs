//! Credit card offer catalog: the immutable data the recommendation engine
//! consumes. A [`CatalogSnapshot`] is taken by a catalog source (database,
//! CSV export, fixture) and handed to the engine per computation; the engine
//! never mutates it.

pub mod import;

pub use import::{CatalogCsvImporter, CatalogImportError};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for card offers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub String);

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Currency a card pays rewards in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardType {
    Cashback,
    Points,
}

impl RewardType {
    pub const fn label(self) -> &'static str {
        match self {
            RewardType::Cashback => "cashback",
            RewardType::Points => "points",
        }
    }
}

/// Subscription tier a card is visible to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardTier {
    Free,
    Premium,
}

impl CardTier {
    pub const fn label(self) -> &'static str {
        match self {
            CardTier::Free => "free",
            CardTier::Premium => "premium",
        }
    }
}

/// Window a reward cap is measured over. A capped rule with no period bounds
/// the full recommendation horizon, which over one year behaves like a
/// yearly cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardPeriod {
    Monthly,
    Yearly,
}

/// A (category, rate, cap, period) tuple governing how an offer rewards a
/// spending category. A rule carrying a sub-category is more specific than a
/// category-only rule for the same category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardRule {
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    /// Fraction of spend returned, e.g. `0.03` for 3%.
    pub rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cap: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<RewardPeriod>,
}

/// Self-reported perk attached to an offer (lounge access, travel credit).
/// The declared annual value can be superseded by a user valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardBenefit {
    pub id: String,
    pub name: String,
    pub annual_value: f64,
    pub recurring: bool,
    /// Informational tag only; benefits are never allocated to categories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Signup bonus terms. `amount` is points for points cards and cash for
/// cashback cards; conversion happens at valuation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupBonus {
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_spend: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeframe_months: Option<u8>,
}

/// One card offer in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCardOffer {
    pub id: CardId,
    pub name: String,
    pub issuer: String,
    pub annual_fee: f64,
    pub reward_type: RewardType,
    /// Fallback rate applied when no reward rule matches a category.
    pub base_reward: f64,
    /// Cash value of one point. Only meaningful for points cards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signup_bonus: Option<SignupBonus>,
    pub tier: CardTier,
    pub active: bool,
    pub rules: Vec<RewardRule>,
    pub benefits: Vec<CardBenefit>,
}

/// A spending sub-category nested under a parent category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubCategory {
    pub id: String,
    pub name: String,
}

/// A top-level spending category and its sub-categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendingCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sub_categories: Vec<SubCategory>,
}

impl SpendingCategory {
    pub fn has_sub_category(&self, id: &str) -> bool {
        self.sub_categories.iter().any(|sub| sub.id == id)
    }
}

/// Immutable catalog snapshot handed to the engine for one computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub as_of: NaiveDate,
    pub categories: Vec<SpendingCategory>,
    pub offers: Vec<CreditCardOffer>,
}

impl CatalogSnapshot {
    pub fn category(&self, id: &str) -> Option<&SpendingCategory> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn offer(&self, id: &CardId) -> Option<&CreditCardOffer> {
        self.offers.iter().find(|offer| &offer.id == id)
    }
}
