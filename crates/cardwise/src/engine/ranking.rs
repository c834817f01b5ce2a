use super::domain::MultiCardStrategy;

/// Orders computed strategies for presentation: highest net value first,
/// then cheaper total fees, then fewer cards.
pub struct StrategyRanker;

impl StrategyRanker {
    pub fn rank(mut strategies: Vec<MultiCardStrategy>, limit: usize) -> Vec<MultiCardStrategy> {
        strategies.sort_by(|a, b| {
            b.total_net_annual_value
                .total_cmp(&a.total_net_annual_value)
                .then(a.total_annual_fees.total_cmp(&b.total_annual_fees))
                .then_with(|| a.card_count().cmp(&b.card_count()))
        });
        strategies.truncate(limit);
        strategies
    }
}
