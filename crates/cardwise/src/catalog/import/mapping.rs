use crate::catalog::{CardTier, RewardPeriod, RewardType, SpendingCategory, SubCategory};
use std::collections::HashMap;
use std::sync::OnceLock;

static CATEGORY_ALIASES: OnceLock<HashMap<String, &'static str>> = OnceLock::new();
static SUB_CATEGORY_ALIASES: OnceLock<HashMap<String, (&'static str, &'static str)>> =
    OnceLock::new();

/// Normalize a raw token from the export: strip a BOM, trim, lowercase, and
/// collapse runs of whitespace.
pub(crate) fn normalize(value: &str) -> String {
    value
        .trim_start_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase()
}

/// Map a category spelling from the export to its canonical id.
pub(crate) fn canonical_category(raw: &str) -> Option<&'static str> {
    category_aliases().get(&normalize(raw)).copied()
}

/// Map a sub-category spelling to `(parent category id, sub-category id)`.
pub(crate) fn canonical_sub_category(raw: &str) -> Option<(&'static str, &'static str)> {
    sub_category_aliases().get(&normalize(raw)).copied()
}

pub(crate) fn reward_type_from(raw: &str) -> Option<RewardType> {
    match normalize(raw).as_str() {
        "cashback" | "cash back" | "cash" => Some(RewardType::Cashback),
        "points" | "point" | "miles" => Some(RewardType::Points),
        _ => None,
    }
}

pub(crate) fn tier_from(raw: &str) -> Option<CardTier> {
    match normalize(raw).as_str() {
        "free" | "standard" => Some(CardTier::Free),
        "premium" | "pro" => Some(CardTier::Premium),
        _ => None,
    }
}

pub(crate) fn period_from(raw: &str) -> Option<RewardPeriod> {
    match normalize(raw).as_str() {
        "monthly" | "month" | "mo" => Some(RewardPeriod::Monthly),
        "yearly" | "annual" | "annually" | "year" | "yr" => Some(RewardPeriod::Yearly),
        _ => None,
    }
}

pub(crate) fn bool_from(raw: &str) -> Option<bool> {
    match normalize(raw).as_str() {
        "true" | "yes" | "y" | "1" | "active" => Some(true),
        "false" | "no" | "n" | "0" | "inactive" => Some(false),
        _ => None,
    }
}

/// The canonical spending category tree exports are mapped onto.
pub(crate) fn standard_categories() -> Vec<SpendingCategory> {
    const TREE: &[(&str, &str, &[(&str, &str)])] = &[
        ("dining", "Dining", &[("restaurants", "Restaurants"), ("delivery", "Food Delivery")]),
        ("groceries", "Groceries", &[]),
        (
            "travel",
            "Travel",
            &[("flights", "Flights"), ("hotels", "Hotels")],
        ),
        ("transport", "Transport", &[("rideshare", "Rideshare"), ("transit", "Transit")]),
        ("gas", "Gas", &[]),
        ("shopping", "Shopping", &[("online", "Online Shopping")]),
        ("entertainment", "Entertainment", &[("streaming", "Streaming")]),
        ("utilities", "Utilities", &[]),
        ("other", "Everything Else", &[]),
    ];

    TREE.iter()
        .map(|(id, name, subs)| SpendingCategory {
            id: (*id).to_string(),
            name: (*name).to_string(),
            sub_categories: subs
                .iter()
                .map(|(sub_id, sub_name)| SubCategory {
                    id: (*sub_id).to_string(),
                    name: (*sub_name).to_string(),
                })
                .collect(),
        })
        .collect()
}

fn category_aliases() -> &'static HashMap<String, &'static str> {
    CATEGORY_ALIASES.get_or_init(|| {
        const ALIASES: &[(&str, &str)] = &[
            ("dining", "dining"),
            ("restaurants", "dining"),
            ("food & drink", "dining"),
            ("groceries", "groceries"),
            ("grocery", "groceries"),
            ("supermarkets", "groceries"),
            ("travel", "travel"),
            ("transport", "transport"),
            ("transportation", "transport"),
            ("commuting", "transport"),
            ("gas", "gas"),
            ("fuel", "gas"),
            ("gas stations", "gas"),
            ("shopping", "shopping"),
            ("retail", "shopping"),
            ("entertainment", "entertainment"),
            ("utilities", "utilities"),
            ("bills", "utilities"),
            ("other", "other"),
            ("everything else", "other"),
            ("base", "other"),
        ];

        ALIASES
            .iter()
            .map(|(alias, id)| (normalize(alias), *id))
            .collect()
    })
}

fn sub_category_aliases() -> &'static HashMap<String, (&'static str, &'static str)> {
    SUB_CATEGORY_ALIASES.get_or_init(|| {
        const ALIASES: &[(&str, &str, &str)] = &[
            ("restaurants", "dining", "restaurants"),
            ("delivery", "dining", "delivery"),
            ("food delivery", "dining", "delivery"),
            ("flights", "travel", "flights"),
            ("airfare", "travel", "flights"),
            ("airlines", "travel", "flights"),
            ("hotels", "travel", "hotels"),
            ("lodging", "travel", "hotels"),
            ("rideshare", "transport", "rideshare"),
            ("ride share", "transport", "rideshare"),
            ("transit", "transport", "transit"),
            ("public transit", "transport", "transit"),
            ("online", "shopping", "online"),
            ("online shopping", "shopping", "online"),
            ("streaming", "entertainment", "streaming"),
        ];

        ALIASES
            .iter()
            .map(|(alias, parent, id)| (normalize(alias), (*parent, *id)))
            .collect()
    })
}

#[cfg(test)]
pub(crate) fn lookup_category_for_tests(raw: &str) -> Option<&'static str> {
    canonical_category(raw)
}

#[cfg(test)]
pub(crate) fn normalize_for_tests(raw: &str) -> String {
    normalize(raw)
}
