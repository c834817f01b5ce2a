use crate::catalog::CreditCardOffer;

use super::intake::SpendingProfile;
use super::resolver::RewardRuleResolver;

/// Below this many eligible cards every 2- and 3-card subset is evaluated
/// outright; above it the optimistic upper-bound prune kicks in.
pub const BRUTE_FORCE_CATALOG_LIMIT: usize = 40;

/// Slack subtracted from the leader before a subset is pruned, so bounds
/// that merely tie the leader are still evaluated.
pub(crate) const PRUNE_SAFETY_MARGIN: f64 = 0.01;

/// Lazy generator of k-card index subsets (k = 2, then 3) over an eligible
/// card list. Subsets are produced in lexicographic index order and never
/// materialized ahead of time.
pub struct CombinationEnumerator {
    n: usize,
    size: usize,
    max_size: usize,
    indices: Vec<usize>,
}

impl CombinationEnumerator {
    pub fn new(n: usize) -> Self {
        Self::with_sizes(n, 2, 3)
    }

    pub fn with_sizes(n: usize, min_size: usize, max_size: usize) -> Self {
        Self {
            n,
            size: min_size,
            max_size,
            indices: Vec::new(),
        }
    }
}

impl Iterator for CombinationEnumerator {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        loop {
            if self.size > self.max_size {
                return None;
            }

            if self.indices.is_empty() {
                if self.size == 0 || self.size > self.n {
                    self.size += 1;
                    continue;
                }
                self.indices = (0..self.size).collect();
                return Some(self.indices.clone());
            }

            if advance(&mut self.indices, self.n) {
                return Some(self.indices.clone());
            }

            self.size += 1;
            self.indices.clear();
        }
    }
}

/// Step `indices` to the next k-combination of `0..n`; false when exhausted.
fn advance(indices: &mut [usize], n: usize) -> bool {
    let k = indices.len();
    let mut i = k;
    while i > 0 {
        i -= 1;
        if indices[i] != n - k + i {
            indices[i] += 1;
            for j in i + 1..k {
                indices[j] = indices[j - 1] + 1;
            }
            return true;
        }
    }
    false
}

/// Per-card optimistic projections used to discard subsets that cannot beat
/// the current leader: each category valued at the card's uncapped rate, no
/// fees subtracted, benefits and signup bonus counted in full.
pub(crate) struct OptimisticProjection {
    /// `per_card[card][entry]` = uncapped annual value of that entry.
    per_card: Vec<Vec<f64>>,
    /// Benefits + signup bonus per card, as included by the preferences.
    extras: Vec<f64>,
}

impl OptimisticProjection {
    pub(crate) fn new(
        offers: &[&CreditCardOffer],
        profile: &SpendingProfile,
        extras: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(offers.len(), extras.len());

        let per_card = offers
            .iter()
            .map(|offer| {
                let resolver = RewardRuleResolver::for_offer(offer);
                profile
                    .active_entries()
                    .map(|entry| {
                        let rate =
                            resolver.best_rate(&entry.category, entry.sub_category.as_deref());
                        entry.monthly_spend * rate * 12.0
                    })
                    .collect()
            })
            .collect();

        Self { per_card, extras }
    }

    /// Upper bound on what any allocation over `subset` can net.
    pub(crate) fn upper_bound(&self, subset: &[usize]) -> f64 {
        let entry_count = self
            .per_card
            .first()
            .map(|values| values.len())
            .unwrap_or(0);

        let mut bound: f64 = subset.iter().map(|&card| self.extras[card]).sum();
        for entry in 0..entry_count {
            let best = subset
                .iter()
                .map(|&card| self.per_card[card][entry])
                .fold(0.0_f64, f64::max);
            bound += best;
        }
        bound
    }
}
