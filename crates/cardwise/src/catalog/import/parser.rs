use serde::{Deserialize, Deserializer};
use std::io::Read;

/// One card row pulled out of the export before enum mapping and packed
/// field expansion happen in the importer.
#[derive(Debug)]
pub(crate) struct CardRecord {
    pub(crate) line: u64,
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) issuer: String,
    pub(crate) annual_fee: f64,
    pub(crate) reward_type: String,
    pub(crate) base_reward: f64,
    pub(crate) point_value: Option<f64>,
    pub(crate) signup_bonus: Option<f64>,
    pub(crate) signup_min_spend: Option<f64>,
    pub(crate) signup_months: Option<u8>,
    pub(crate) tier: String,
    pub(crate) active: String,
    pub(crate) rules: Option<String>,
    pub(crate) benefits: Option<String>,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<CardRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    // Header occupies line 1.
    let mut line: u64 = 1;
    for record in csv_reader.deserialize::<CardRow>() {
        line += 1;
        let row = record?;
        records.push(CardRecord {
            line,
            id: row.id,
            name: row.name,
            issuer: row.issuer,
            annual_fee: row.annual_fee,
            reward_type: row.reward_type,
            base_reward: row.base_reward,
            point_value: row.point_value,
            signup_bonus: row.signup_bonus,
            signup_min_spend: row.signup_min_spend,
            signup_months: row.signup_months,
            tier: row.tier,
            active: row.active,
            rules: row.rules,
            benefits: row.benefits,
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct CardRow {
    #[serde(rename = "Card ID")]
    id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Issuer")]
    issuer: String,
    #[serde(rename = "Annual Fee")]
    annual_fee: f64,
    #[serde(rename = "Reward Type")]
    reward_type: String,
    #[serde(rename = "Base Reward")]
    base_reward: f64,
    #[serde(rename = "Point Value", default, deserialize_with = "empty_as_none")]
    point_value: Option<f64>,
    #[serde(rename = "Signup Bonus", default, deserialize_with = "empty_as_none")]
    signup_bonus: Option<f64>,
    #[serde(
        rename = "Signup Min Spend",
        default,
        deserialize_with = "empty_as_none"
    )]
    signup_min_spend: Option<f64>,
    #[serde(rename = "Signup Months", default, deserialize_with = "empty_as_none")]
    signup_months: Option<u8>,
    #[serde(rename = "Tier")]
    tier: String,
    #[serde(rename = "Active")]
    active: String,
    #[serde(rename = "Rules", default, deserialize_with = "empty_string_as_none")]
    rules: Option<String>,
    #[serde(rename = "Benefits", default, deserialize_with = "empty_string_as_none")]
    benefits: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
