use crate::catalog::CatalogSnapshot;

/// Boundary to whatever holds the card catalog (database, CSV export,
/// fixture). The engine only ever sees an immutable snapshot per call.
pub trait CatalogSource: Send + Sync {
    fn snapshot(&self) -> Result<CatalogSnapshot, CatalogSourceError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogSourceError {
    #[error("no catalog has been loaded")]
    NotLoaded,
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}
