use crate::catalog::CreditCardOffer;

use super::domain::{CategoryAllocation, MultiCardStrategy};
use super::intake::SpendingProfile;
use super::resolver::RewardRuleResolver;
use super::value::{annualize, CardValueCalculator, ValuationError};

/// Assigns every spending category to the best card within a fixed subset.
///
/// Categories do not interact (no cross-category thresholds), so the greedy
/// per-category choice is also the global optimum for the subset. Ties go to
/// the earlier member so identical inputs always allocate identically.
pub struct CategoryAllocationOptimizer<'a> {
    calculator: &'a CardValueCalculator,
}

impl<'a> CategoryAllocationOptimizer<'a> {
    pub fn new(calculator: &'a CardValueCalculator) -> Self {
        Self { calculator }
    }

    pub fn optimize(
        &self,
        subset: &[&CreditCardOffer],
        profile: &SpendingProfile,
    ) -> Result<MultiCardStrategy, ValuationError> {
        let resolvers: Vec<RewardRuleResolver<'_>> = subset
            .iter()
            .map(|offer| RewardRuleResolver::for_offer(offer))
            .collect();

        let mut gross_reward_value = 0.0;
        let mut allocations = Vec::new();
        for entry in profile.active_entries() {
            let mut best: Option<(usize, f64)> = None;
            for (member, resolver) in resolvers.iter().enumerate() {
                let quote = resolver.resolve(&entry.category, entry.sub_category.as_deref());
                let (annual_value, _) = annualize(&quote, entry.monthly_spend);
                if best.map_or(true, |(_, value)| annual_value > value) {
                    best = Some((member, annual_value));
                }
            }

            if let Some((member, annual_value)) = best {
                gross_reward_value += annual_value;
                allocations.push(CategoryAllocation {
                    category: entry.category.clone(),
                    sub_category: entry.sub_category.clone(),
                    card_id: subset[member].id.clone(),
                    annual_value,
                });
            }
        }

        // Fees, benefits, and signup bonuses count once per member card,
        // whether or not any category landed on it.
        let mut benefits_value = 0.0;
        let mut signup_bonus_value = 0.0;
        let mut total_annual_fees = 0.0;
        let mut fee_deduction = 0.0;
        for offer in subset {
            benefits_value += self.calculator.benefits_component(offer);
            signup_bonus_value += self.calculator.signup_component(offer)?;
            total_annual_fees += offer.annual_fee;
            fee_deduction += self.calculator.fee_component(offer);
        }

        Ok(MultiCardStrategy {
            card_ids: subset.iter().map(|offer| offer.id.clone()).collect(),
            allocations,
            gross_reward_value,
            benefits_value,
            signup_bonus_value,
            total_annual_fees,
            total_net_annual_value: gross_reward_value + benefits_value + signup_bonus_value
                - fee_deduction,
        })
    }
}
