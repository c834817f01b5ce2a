use std::collections::HashMap;

use crate::catalog::{CreditCardOffer, RewardPeriod, RewardRule};

/// Where a resolved rate came from, most specific first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateSource {
    SubCategoryRule,
    CategoryRule,
    BaseReward,
}

/// The rate (and the cap terms the caller must apply after annualizing)
/// resolved for one category/sub-category pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateQuote {
    pub rate: f64,
    pub cap: Option<f64>,
    pub period: Option<RewardPeriod>,
    pub source: RateSource,
}

impl RateQuote {
    fn from_rule(rule: &RewardRule, source: RateSource) -> Self {
        Self {
            rate: rule.rate,
            cap: rule.cap,
            period: rule.period,
            source,
        }
    }
}

/// Tagged rule lookup for a single offer.
///
/// Resolution is most specific first: a sub-category rule (only when the
/// entry itself names a sub-category), then a category-only rule, then the
/// offer's base reward. The catalog invariant promises at most one rule per
/// scope; should a feed violate it, the highest rate at that scope wins.
pub struct RewardRuleResolver<'a> {
    base_reward: f64,
    by_category: HashMap<&'a str, &'a RewardRule>,
    by_sub_category: HashMap<(&'a str, &'a str), &'a RewardRule>,
}

impl<'a> RewardRuleResolver<'a> {
    pub fn for_offer(offer: &'a CreditCardOffer) -> Self {
        let mut by_category: HashMap<&str, &RewardRule> = HashMap::new();
        let mut by_sub_category: HashMap<(&str, &str), &RewardRule> = HashMap::new();

        for rule in &offer.rules {
            match &rule.sub_category {
                Some(sub) => {
                    by_sub_category
                        .entry((rule.category.as_str(), sub.as_str()))
                        .and_modify(|existing| {
                            if rule.rate > existing.rate {
                                *existing = rule;
                            }
                        })
                        .or_insert(rule);
                }
                None => {
                    by_category
                        .entry(rule.category.as_str())
                        .and_modify(|existing| {
                            if rule.rate > existing.rate {
                                *existing = rule;
                            }
                        })
                        .or_insert(rule);
                }
            }
        }

        Self {
            base_reward: offer.base_reward,
            by_category,
            by_sub_category,
        }
    }

    pub fn resolve(&self, category: &str, sub_category: Option<&str>) -> RateQuote {
        if let Some(sub) = sub_category {
            if let Some(rule) = self.by_sub_category.get(&(category, sub)) {
                return RateQuote::from_rule(rule, RateSource::SubCategoryRule);
            }
        }

        if let Some(rule) = self.by_category.get(category) {
            return RateQuote::from_rule(rule, RateSource::CategoryRule);
        }

        RateQuote {
            rate: self.base_reward,
            cap: None,
            period: None,
            source: RateSource::BaseReward,
        }
    }

    /// Best rate this offer could pay on a category, ignoring caps. Used by
    /// the combination search to build an optimistic upper bound.
    pub fn best_rate(&self, category: &str, sub_category: Option<&str>) -> f64 {
        self.resolve(category, sub_category).rate
    }
}
