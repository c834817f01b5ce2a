use crate::infra::{load_catalog, InMemoryCatalogSource};
use cardwise::config::CatalogConfig;
use cardwise::engine::{
    RecommendationRequest, RecommendationService, RewardPreference, SpendingEntry,
    SubscriptionTier,
};
use cardwise::error::AppError;
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Catalog CSV export to rank against. Defaults to the built-in sample.
    #[arg(long)]
    pub(crate) catalog_csv: Option<PathBuf>,
    /// Catalog snapshot date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// How many cards and strategies to print.
    #[arg(long, default_value_t = 5)]
    pub(crate) top: usize,
    /// Skip the multi-card strategy portion of the demo.
    #[arg(long)]
    pub(crate) skip_strategies: bool,
}

fn demo_request(top: usize) -> RecommendationRequest {
    let spending = vec![
        entry("dining", None, 450.0),
        entry("groceries", None, 600.0),
        entry("travel", Some("flights"), 200.0),
        entry("gas", None, 150.0),
        entry("entertainment", Some("streaming"), 45.0),
        entry("other", None, 800.0),
    ];

    RecommendationRequest {
        spending,
        preferences: Default::default(),
        reward_preference: RewardPreference::BestOverall,
        point_value_override: None,
        benefit_valuations: Vec::new(),
        owned_cards: Vec::new(),
        subscription_tier: SubscriptionTier::Premium,
        limit: Some(top),
    }
}

fn entry(category: &str, sub_category: Option<&str>, monthly_spend: f64) -> SpendingEntry {
    SpendingEntry {
        category: category.to_string(),
        sub_category: sub_category.map(str::to_string),
        monthly_spend,
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        catalog_csv,
        as_of,
        top,
        skip_strategies,
    } = args;

    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
    let config = CatalogConfig {
        csv_path: catalog_csv,
    };
    let snapshot = load_catalog(&config, as_of)?;

    println!("Card recommendation demo (catalog as of {as_of})");
    println!("Catalog: {} offers", snapshot.offers.len());
    for offer in &snapshot.offers {
        println!(
            "- {} ({}) [{}, {} tier] fee ${:.0}",
            offer.name,
            offer.id,
            offer.reward_type.label(),
            offer.tier.label(),
            offer.annual_fee
        );
    }

    let service = RecommendationService::new(Arc::new(InMemoryCatalogSource::new(snapshot)));
    let request = demo_request(top);

    println!(
        "\nMonthly spending profile ({} cards)",
        request.reward_preference.label()
    );
    for entry in &request.spending {
        match &entry.sub_category {
            Some(sub) => println!("- {}/{}: ${:.0}", entry.category, sub, entry.monthly_spend),
            None => println!("- {}: ${:.0}", entry.category, entry.monthly_spend),
        }
    }

    let cards = service.recommend_cards(&request).map_err(AppError::from)?;
    println!("\nTop single cards by first-year net value");
    for (rank, result) in cards.results.iter().enumerate() {
        println!(
            "{}. {} ({}) -> net ${:.2}",
            rank + 1,
            result.card_name,
            result.card_id,
            result.net_annual_value
        );
        println!(
            "   rewards ${:.2} | benefits ${:.2} | signup ${:.2} | fee ${:.2}",
            result.gross_reward_value,
            result.benefits_value,
            result.signup_bonus_value,
            result.annual_fee
        );
        for line in &result.breakdown {
            let capped_note = if line.capped { " (capped)" } else { "" };
            match &line.sub_category {
                Some(sub) => println!(
                    "   - {}/{} at {:.1}% -> ${:.2}{capped_note}",
                    line.category,
                    sub,
                    line.rate * 100.0,
                    line.annual_value
                ),
                None => println!(
                    "   - {} at {:.1}% -> ${:.2}{capped_note}",
                    line.category,
                    line.rate * 100.0,
                    line.annual_value
                ),
            }
        }
    }
    print_warnings(&cards.warnings);

    if skip_strategies {
        return Ok(());
    }

    let strategies = service
        .recommend_strategies(&request)
        .map_err(AppError::from)?;
    println!("\nTop multi-card strategies");
    for (rank, strategy) in strategies.strategies.iter().enumerate() {
        let members: Vec<String> = strategy
            .card_ids
            .iter()
            .map(|id| id.to_string())
            .collect();
        println!(
            "{}. [{}] -> net ${:.2} (fees ${:.2})",
            rank + 1,
            members.join(" + "),
            strategy.total_net_annual_value,
            strategy.total_annual_fees
        );
        for allocation in &strategy.allocations {
            match &allocation.sub_category {
                Some(sub) => println!(
                    "   - {}/{} -> {} (${:.2}/yr)",
                    allocation.category, sub, allocation.card_id, allocation.annual_value
                ),
                None => println!(
                    "   - {} -> {} (${:.2}/yr)",
                    allocation.category, allocation.card_id, allocation.annual_value
                ),
            }
        }
    }
    print_warnings(&strategies.warnings);

    Ok(())
}

fn print_warnings(warnings: &[cardwise::engine::CardWarning]) {
    if warnings.is_empty() {
        return;
    }
    println!("\nDropped cards");
    for warning in warnings {
        println!("- {} ({}): {}", warning.card_id, warning.kind.label(), warning.detail);
    }
}
