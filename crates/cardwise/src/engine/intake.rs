use std::collections::HashSet;

use crate::catalog::{CatalogSnapshot, CreditCardOffer};

use super::domain::{RecommendationRequest, SpendingEntry};

/// Hard input failures. No partial computation happens after one of these.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("monthly spend for '{category}' is negative ({amount})")]
    NegativeSpend { category: String, amount: f64 },
    #[error("monthly spend for '{category}' is not a finite number")]
    NonFiniteSpend { category: String },
    #[error("unknown spending category '{0}'")]
    UnknownCategory(String),
    #[error("unknown sub-category '{sub_category}' under category '{category}'")]
    UnknownSubCategory {
        category: String,
        sub_category: String,
    },
    #[error("duplicate spending entry for category '{category}'")]
    DuplicateEntry { category: String },
    #[error("point value override must be a positive number")]
    InvalidPointValueOverride,
}

/// Contradictory catalog data for a single card. Soft failure: the card is
/// excluded from results and the error surfaces as a warning.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntegrityError {
    #[error("rule references unknown category '{category}'")]
    UnknownRuleCategory { category: String },
    #[error("rule sub-category '{sub_category}' does not belong to category '{category}'")]
    RuleParentMismatch {
        category: String,
        sub_category: String,
    },
    #[error("rule for '{category}' has an invalid rate ({rate})")]
    InvalidRate { category: String, rate: f64 },
    #[error("rule for '{category}' has a negative cap ({cap})")]
    NegativeCap { category: String, cap: f64 },
}

/// Validated spending profile the calculators operate on.
#[derive(Debug, Clone, PartialEq)]
pub struct SpendingProfile {
    entries: Vec<SpendingEntry>,
}

impl SpendingProfile {
    /// Entries that actually contribute reward value.
    pub fn active_entries(&self) -> impl Iterator<Item = &SpendingEntry> {
        self.entries.iter().filter(|entry| entry.monthly_spend > 0.0)
    }

    #[cfg(test)]
    pub(crate) fn from_entries_unchecked(entries: Vec<SpendingEntry>) -> Self {
        Self { entries }
    }
}

/// Guard producing validated [`SpendingProfile`]s and vetting catalog rows.
#[derive(Debug, Clone, Default)]
pub struct RequestGuard;

impl RequestGuard {
    pub fn new() -> Self {
        Self
    }

    /// Validate the request against the catalog's category tree.
    pub fn sanitize(
        &self,
        request: &RecommendationRequest,
        snapshot: &CatalogSnapshot,
    ) -> Result<SpendingProfile, ValidationError> {
        if let Some(value) = request.point_value_override {
            if !(value.is_finite() && value > 0.0) {
                return Err(ValidationError::InvalidPointValueOverride);
            }
        }

        let mut seen: HashSet<(String, Option<String>)> = HashSet::new();
        for entry in &request.spending {
            if !entry.monthly_spend.is_finite() {
                return Err(ValidationError::NonFiniteSpend {
                    category: entry.category.clone(),
                });
            }
            if entry.monthly_spend < 0.0 {
                return Err(ValidationError::NegativeSpend {
                    category: entry.category.clone(),
                    amount: entry.monthly_spend,
                });
            }

            let category = snapshot
                .category(&entry.category)
                .ok_or_else(|| ValidationError::UnknownCategory(entry.category.clone()))?;

            if let Some(sub) = &entry.sub_category {
                if !category.has_sub_category(sub) {
                    return Err(ValidationError::UnknownSubCategory {
                        category: entry.category.clone(),
                        sub_category: sub.clone(),
                    });
                }
            }

            if !seen.insert((entry.category.clone(), entry.sub_category.clone())) {
                return Err(ValidationError::DuplicateEntry {
                    category: entry.category.clone(),
                });
            }
        }

        Ok(SpendingProfile {
            entries: request.spending.clone(),
        })
    }

    /// Vet one offer's rule set against the category tree. A failing card is
    /// dropped from ranking rather than aborting the computation.
    pub fn check_offer(
        &self,
        offer: &CreditCardOffer,
        snapshot: &CatalogSnapshot,
    ) -> Result<(), IntegrityError> {
        for rule in &offer.rules {
            let category = snapshot.category(&rule.category).ok_or_else(|| {
                IntegrityError::UnknownRuleCategory {
                    category: rule.category.clone(),
                }
            })?;

            if let Some(sub) = &rule.sub_category {
                if !category.has_sub_category(sub) {
                    return Err(IntegrityError::RuleParentMismatch {
                        category: rule.category.clone(),
                        sub_category: sub.clone(),
                    });
                }
            }

            if !rule.rate.is_finite() || rule.rate < 0.0 {
                return Err(IntegrityError::InvalidRate {
                    category: rule.category.clone(),
                    rate: rule.rate,
                });
            }
            if let Some(cap) = rule.cap {
                if !cap.is_finite() || cap < 0.0 {
                    return Err(IntegrityError::NegativeCap {
                        category: rule.category.clone(),
                        cap,
                    });
                }
            }
        }

        Ok(())
    }
}
