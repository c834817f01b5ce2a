use chrono::NaiveDate;

use crate::catalog::{
    CardBenefit, CardId, CardTier, CatalogSnapshot, CreditCardOffer, RewardPeriod, RewardRule,
    RewardType, SignupBonus, SpendingCategory, SubCategory,
};
use crate::engine::domain::{RecommendationRequest, RewardPreference, SpendingEntry, SubscriptionTier};
use crate::engine::intake::SpendingProfile;
use crate::engine::source::{CatalogSource, CatalogSourceError};

pub(super) fn categories() -> Vec<SpendingCategory> {
    fn category(id: &str, subs: &[&str]) -> SpendingCategory {
        SpendingCategory {
            id: id.to_string(),
            name: id.to_string(),
            sub_categories: subs
                .iter()
                .map(|sub| SubCategory {
                    id: (*sub).to_string(),
                    name: (*sub).to_string(),
                })
                .collect(),
        }
    }

    vec![
        category("dining", &["restaurants", "delivery"]),
        category("travel", &["flights", "hotels"]),
        category("groceries", &[]),
        category("gas", &[]),
        category("other", &[]),
    ]
}

pub(super) fn snapshot(offers: Vec<CreditCardOffer>) -> CatalogSnapshot {
    CatalogSnapshot {
        as_of: NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date"),
        categories: categories(),
        offers,
    }
}

pub(super) fn cashback_card(id: &str, name: &str, annual_fee: f64, base_reward: f64) -> CreditCardOffer {
    CreditCardOffer {
        id: CardId(id.to_string()),
        name: name.to_string(),
        issuer: "Harbor CU".to_string(),
        annual_fee,
        reward_type: RewardType::Cashback,
        base_reward,
        point_value: None,
        signup_bonus: None,
        tier: CardTier::Free,
        active: true,
        rules: Vec::new(),
        benefits: Vec::new(),
    }
}

pub(super) fn points_card(
    id: &str,
    name: &str,
    annual_fee: f64,
    base_reward: f64,
    point_value: Option<f64>,
) -> CreditCardOffer {
    CreditCardOffer {
        id: CardId(id.to_string()),
        name: name.to_string(),
        issuer: "Atlas Bank".to_string(),
        annual_fee,
        reward_type: RewardType::Points,
        base_reward,
        point_value,
        signup_bonus: None,
        tier: CardTier::Premium,
        active: true,
        rules: Vec::new(),
        benefits: Vec::new(),
    }
}

pub(super) fn rule(category: &str, rate: f64) -> RewardRule {
    RewardRule {
        category: category.to_string(),
        sub_category: None,
        rate,
        cap: None,
        period: None,
    }
}

pub(super) fn sub_rule(category: &str, sub_category: &str, rate: f64) -> RewardRule {
    RewardRule {
        category: category.to_string(),
        sub_category: Some(sub_category.to_string()),
        rate,
        cap: None,
        period: None,
    }
}

pub(super) fn capped_rule(
    category: &str,
    rate: f64,
    cap: f64,
    period: Option<RewardPeriod>,
) -> RewardRule {
    RewardRule {
        category: category.to_string(),
        sub_category: None,
        rate,
        cap: Some(cap),
        period,
    }
}

pub(super) fn benefit(id: &str, name: &str, annual_value: f64) -> CardBenefit {
    CardBenefit {
        id: id.to_string(),
        name: name.to_string(),
        annual_value,
        recurring: true,
        category: None,
    }
}

pub(super) fn signup(amount: f64) -> SignupBonus {
    SignupBonus {
        amount,
        minimum_spend: Some(3000.0),
        timeframe_months: Some(3),
    }
}

pub(super) fn entry(category: &str, monthly_spend: f64) -> SpendingEntry {
    SpendingEntry {
        category: category.to_string(),
        sub_category: None,
        monthly_spend,
    }
}

pub(super) fn sub_entry(category: &str, sub_category: &str, monthly_spend: f64) -> SpendingEntry {
    SpendingEntry {
        category: category.to_string(),
        sub_category: Some(sub_category.to_string()),
        monthly_spend,
    }
}

pub(super) fn request(spending: Vec<SpendingEntry>) -> RecommendationRequest {
    RecommendationRequest {
        spending,
        preferences: Default::default(),
        reward_preference: RewardPreference::BestOverall,
        point_value_override: None,
        benefit_valuations: Vec::new(),
        owned_cards: Vec::new(),
        subscription_tier: SubscriptionTier::Premium,
        limit: None,
    }
}

pub(super) fn profile(entries: Vec<SpendingEntry>) -> SpendingProfile {
    SpendingProfile::from_entries_unchecked(entries)
}

/// Catalog source backed by a fixed snapshot.
pub(super) struct FixedCatalog {
    snapshot: CatalogSnapshot,
}

impl FixedCatalog {
    pub(super) fn new(snapshot: CatalogSnapshot) -> Self {
        Self { snapshot }
    }
}

impl CatalogSource for FixedCatalog {
    fn snapshot(&self) -> Result<CatalogSnapshot, CatalogSourceError> {
        Ok(self.snapshot.clone())
    }
}

/// Catalog source that always fails, for availability tests.
pub(super) struct UnavailableCatalog;

impl CatalogSource for UnavailableCatalog {
    fn snapshot(&self) -> Result<CatalogSnapshot, CatalogSourceError> {
        Err(CatalogSourceError::Unavailable(
            "catalog backend offline".to_string(),
        ))
    }
}
