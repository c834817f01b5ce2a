use cardwise::catalog::{CatalogCsvImporter, CatalogSnapshot};
use cardwise::config::CatalogConfig;
use cardwise::engine::{CatalogSource, CatalogSourceError};
use cardwise::error::AppError;
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Catalog source serving one snapshot loaded at startup.
pub(crate) struct InMemoryCatalogSource {
    snapshot: CatalogSnapshot,
}

impl InMemoryCatalogSource {
    pub(crate) fn new(snapshot: CatalogSnapshot) -> Self {
        Self { snapshot }
    }
}

impl CatalogSource for InMemoryCatalogSource {
    fn snapshot(&self) -> Result<CatalogSnapshot, CatalogSourceError> {
        Ok(self.snapshot.clone())
    }
}

/// Built-in catalog used when no CSV export is configured.
const SAMPLE_CATALOG_CSV: &str = "\
Card ID,Name,Issuer,Annual Fee,Reward Type,Base Reward,Point Value,Signup Bonus,Signup Min Spend,Signup Months,Tier,Active,Rules,Benefits
sapphire-select,Sapphire Select,Atlas Bank,95,points,0.01,0.0125,60000,4000,3,premium,yes,\"dining:0.03;travel:0.05\",\"lounge|Lounge Access|469|recurring|travel;travel-credit|Annual Travel Credit|300|recurring|travel\"
cash-plus,Cash Plus,Harbor CU,0,cashback,0.015,,200,500,3,free,yes,,
everyday-grocer,Everyday Grocer,Harbor CU,0,cashback,0.01,,,,,free,yes,\"groceries:0.06:50:monthly;gas:0.03\",
commuter-rewards,Commuter Rewards,Atlas Bank,0,cashback,0.01,,150,1000,3,free,yes,\"transport:0.04;gas:0.04:100:yearly\",
voyager-elite,Voyager Elite,Atlas Bank,250,points,0.012,0.015,80000,6000,3,premium,yes,\"travel/flights:0.05;travel/hotels:0.04;dining:0.02\",\"lounge|Lounge Access|469|recurring|travel\"
streamline,Streamline,Harbor CU,0,cashback,0.01,,,,,free,yes,\"entertainment/streaming:0.06:25:monthly;utilities:0.02\",
";

pub(crate) fn load_catalog(
    config: &CatalogConfig,
    as_of: NaiveDate,
) -> Result<CatalogSnapshot, AppError> {
    let snapshot = match &config.csv_path {
        Some(path) => CatalogCsvImporter::from_path(path, as_of)?,
        None => CatalogCsvImporter::from_reader(std::io::Cursor::new(SAMPLE_CATALOG_CSV), as_of)?,
    };
    Ok(snapshot)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
