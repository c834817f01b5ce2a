//! CSV catalog importer.
//!
//! Card programs circulate as spreadsheet exports, one card per row, with the
//! reward rules and benefits packed into single columns:
//!
//! - `Rules`: `scope:rate[:cap[:period]]` items separated by `;`, where the
//!   scope is a category spelling or `category/sub-category`
//!   (e.g. `dining:0.04`, `travel/flights:0.05:300:yearly`).
//! - `Benefits`: `id|name|annual value[|recurring[|category]]` items
//!   separated by `;`.
//!
//! Spellings are normalized onto the canonical category tree; rows that
//! cannot be mapped fail with the offending line number.

mod mapping;
mod parser;

use crate::catalog::{
    CardBenefit, CardId, CatalogSnapshot, CreditCardOffer, RewardRule, SignupBonus,
};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use parser::CardRecord;

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Row { line: u64, reason: String },
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read catalog export: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid catalog CSV data: {}", err),
            CatalogImportError::Row { line, reason } => {
                write!(f, "invalid catalog row at line {}: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
            CatalogImportError::Row { .. } => None,
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct CatalogCsvImporter;

impl CatalogCsvImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        as_of: NaiveDate,
    ) -> Result<CatalogSnapshot, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, as_of)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        as_of: NaiveDate,
    ) -> Result<CatalogSnapshot, CatalogImportError> {
        let mut offers = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for record in parser::parse_records(reader)? {
            if !seen.insert(record.id.clone()) {
                tracing::warn!(card = %record.id, line = record.line, "duplicate card id in export, keeping first row");
                continue;
            }
            offers.push(offer_from_record(record)?);
        }

        Ok(CatalogSnapshot {
            as_of,
            categories: mapping::standard_categories(),
            offers,
        })
    }
}

fn offer_from_record(record: CardRecord) -> Result<CreditCardOffer, CatalogImportError> {
    let line = record.line;
    let row_error = |reason: String| CatalogImportError::Row { line, reason };

    let reward_type = mapping::reward_type_from(&record.reward_type)
        .ok_or_else(|| row_error(format!("unknown reward type '{}'", record.reward_type)))?;
    let tier = mapping::tier_from(&record.tier)
        .ok_or_else(|| row_error(format!("unknown tier '{}'", record.tier)))?;
    let active = mapping::bool_from(&record.active)
        .ok_or_else(|| row_error(format!("unknown active flag '{}'", record.active)))?;

    let rules = match record.rules.as_deref() {
        Some(packed) => parse_rules(packed, line)?,
        None => Vec::new(),
    };
    let benefits = match record.benefits.as_deref() {
        Some(packed) => parse_benefits(packed, line)?,
        None => Vec::new(),
    };

    let signup_bonus = record.signup_bonus.map(|amount| SignupBonus {
        amount,
        minimum_spend: record.signup_min_spend,
        timeframe_months: record.signup_months,
    });

    Ok(CreditCardOffer {
        id: CardId(record.id),
        name: record.name,
        issuer: record.issuer,
        annual_fee: record.annual_fee,
        reward_type,
        base_reward: record.base_reward,
        point_value: record.point_value,
        signup_bonus,
        tier,
        active,
        rules,
        benefits,
    })
}

fn parse_rules(packed: &str, line: u64) -> Result<Vec<RewardRule>, CatalogImportError> {
    let row_error = |reason: String| CatalogImportError::Row { line, reason };
    let mut rules = Vec::new();

    for item in packed.split(';').map(str::trim).filter(|item| !item.is_empty()) {
        let mut fields = item.split(':').map(str::trim);
        let scope = fields
            .next()
            .ok_or_else(|| row_error(format!("empty rule item '{item}'")))?;
        let rate = fields
            .next()
            .ok_or_else(|| row_error(format!("rule '{item}' is missing a rate")))?
            .parse::<f64>()
            .map_err(|_| row_error(format!("rule '{item}' has a non-numeric rate")))?;

        let cap = match fields.next() {
            Some("") | None => None,
            Some(raw) => Some(
                raw.parse::<f64>()
                    .map_err(|_| row_error(format!("rule '{item}' has a non-numeric cap")))?,
            ),
        };
        let period = match fields.next() {
            Some("") | None => None,
            Some(raw) => Some(
                mapping::period_from(raw)
                    .ok_or_else(|| row_error(format!("rule '{item}' has unknown period '{raw}'")))?,
            ),
        };

        let (category, sub_category) = match scope.split_once('/') {
            Some((parent, sub)) => {
                let category = mapping::canonical_category(parent)
                    .ok_or_else(|| row_error(format!("unknown category '{parent}'")))?;
                let (_, sub_id) = mapping::canonical_sub_category(sub)
                    .ok_or_else(|| row_error(format!("unknown sub-category '{sub}'")))?;
                (category.to_string(), Some(sub_id.to_string()))
            }
            None => {
                let category = mapping::canonical_category(scope)
                    .ok_or_else(|| row_error(format!("unknown category '{scope}'")))?;
                (category.to_string(), None)
            }
        };

        rules.push(RewardRule {
            category,
            sub_category,
            rate,
            cap,
            period,
        });
    }

    Ok(rules)
}

fn parse_benefits(packed: &str, line: u64) -> Result<Vec<CardBenefit>, CatalogImportError> {
    let row_error = |reason: String| CatalogImportError::Row { line, reason };
    let mut benefits = Vec::new();

    for item in packed.split(';').map(str::trim).filter(|item| !item.is_empty()) {
        let fields: Vec<&str> = item.split('|').map(str::trim).collect();
        if fields.len() < 3 {
            return Err(row_error(format!(
                "benefit '{item}' needs at least id, name, and value"
            )));
        }

        let annual_value = fields[2]
            .parse::<f64>()
            .map_err(|_| row_error(format!("benefit '{item}' has a non-numeric value")))?;
        let recurring = match fields.get(3) {
            Some(raw) if !raw.is_empty() => match mapping::normalize(raw).as_str() {
                "recurring" => true,
                "one-time" | "one time" => false,
                other => mapping::bool_from(other).ok_or_else(|| {
                    row_error(format!("benefit '{item}' has unknown recurrence '{raw}'"))
                })?,
            },
            _ => true,
        };
        let category = fields
            .get(4)
            .filter(|raw| !raw.is_empty())
            .and_then(|raw| mapping::canonical_category(raw))
            .map(str::to_string);

        benefits.push(CardBenefit {
            id: fields[0].to_string(),
            name: fields[1].to_string(),
            annual_value,
            recurring,
            category,
        });
    }

    Ok(benefits)
}
