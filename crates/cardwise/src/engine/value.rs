use std::collections::HashMap;

use crate::catalog::{CardId, CreditCardOffer, RewardPeriod, RewardType};

use super::domain::{
    BenefitValuation, CalculationPreferences, CardValueResult, CategoryValue, EffectiveInclusions,
};
use super::intake::SpendingProfile;
use super::resolver::{RateQuote, RewardRuleResolver};

/// Catalog data that makes a single card unvaluable. Soft failure: the card
/// is dropped and the error surfaces as a warning.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValuationError {
    #[error("points card '{card}' has no point value configured")]
    MissingPointValue { card: CardId },
}

/// Stateless first-year value calculator for a single card against a
/// spending profile. Same inputs always produce the same result.
pub struct CardValueCalculator {
    inclusions: EffectiveInclusions,
    point_value_override: Option<f64>,
    valuations: HashMap<String, f64>,
}

impl CardValueCalculator {
    pub fn new(
        preferences: CalculationPreferences,
        point_value_override: Option<f64>,
        valuations: &[BenefitValuation],
    ) -> Self {
        Self {
            inclusions: preferences.effective(),
            point_value_override,
            valuations: valuations
                .iter()
                .map(|valuation| (valuation.benefit_id.clone(), valuation.personal_value))
                .collect(),
        }
    }

    pub fn compute(
        &self,
        offer: &CreditCardOffer,
        profile: &SpendingProfile,
    ) -> Result<CardValueResult, ValuationError> {
        let resolver = RewardRuleResolver::for_offer(offer);

        let mut gross_reward_value = 0.0;
        let mut breakdown = Vec::new();
        for entry in profile.active_entries() {
            let quote = resolver.resolve(&entry.category, entry.sub_category.as_deref());
            let (annual_value, capped) = annualize(&quote, entry.monthly_spend);
            gross_reward_value += annual_value;
            breakdown.push(CategoryValue {
                category: entry.category.clone(),
                sub_category: entry.sub_category.clone(),
                rate: quote.rate,
                annual_value,
                capped,
            });
        }

        let benefits_value = self.benefits_component(offer);
        let signup_bonus_value = self.signup_component(offer)?;
        let fee_deduction = if self.inclusions.annual_fees {
            offer.annual_fee
        } else {
            0.0
        };

        Ok(CardValueResult {
            card_id: offer.id.clone(),
            card_name: offer.name.clone(),
            gross_reward_value,
            benefits_value,
            signup_bonus_value,
            annual_fee: offer.annual_fee,
            net_annual_value: gross_reward_value + benefits_value + signup_bonus_value
                - fee_deduction,
            breakdown,
        })
    }

    /// Sum of benefit values, preferring the user's personal valuation over
    /// the catalog-declared annual value. Zero when benefits are excluded.
    pub fn benefits_component(&self, offer: &CreditCardOffer) -> f64 {
        if !self.inclusions.benefits {
            return 0.0;
        }

        offer
            .benefits
            .iter()
            .map(|benefit| {
                self.valuations
                    .get(&benefit.id)
                    .copied()
                    .unwrap_or(benefit.annual_value)
            })
            .sum()
    }

    /// Cash-equivalent signup bonus, credited in full in year one. Points
    /// bonuses convert through the override or the offer's point value.
    pub fn signup_component(&self, offer: &CreditCardOffer) -> Result<f64, ValuationError> {
        if !self.inclusions.signup_bonuses {
            return Ok(0.0);
        }

        let Some(bonus) = &offer.signup_bonus else {
            return Ok(0.0);
        };

        match offer.reward_type {
            RewardType::Cashback => Ok(bonus.amount),
            RewardType::Points => {
                let point_value = self
                    .point_value_override
                    .or(offer.point_value)
                    .ok_or_else(|| ValuationError::MissingPointValue {
                        card: offer.id.clone(),
                    })?;
                Ok(bonus.amount * point_value)
            }
        }
    }

    /// Fee subtracted from net value. Zero when fees are excluded.
    pub fn fee_component(&self, offer: &CreditCardOffer) -> f64 {
        if self.inclusions.annual_fees {
            offer.annual_fee
        } else {
            0.0
        }
    }
}

/// Annualize a category's reward and apply the cap. A yearly cap bounds the
/// annual amount directly; a monthly cap bounds each month, so twelve times
/// the cap over a year. A cap with no period bounds the whole horizon, which
/// over the one-year window behaves like a yearly cap.
pub(crate) fn annualize(quote: &RateQuote, monthly_spend: f64) -> (f64, bool) {
    let raw = monthly_spend * quote.rate * 12.0;
    match quote.cap {
        None => (raw, false),
        Some(cap) => {
            let limit = match quote.period {
                Some(RewardPeriod::Monthly) => cap * 12.0,
                Some(RewardPeriod::Yearly) | None => cap,
            };
            if raw > limit {
                (limit, true)
            } else {
                (raw, false)
            }
        }
    }
}
