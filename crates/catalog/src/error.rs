use thiserror::Error;

use crate::product::ProductId;

/// Errors produced by catalog construction and lookups.
///
/// The not-found variants signal an internal invariant violation when they
/// surface from the recommendation path: callers there only look up keys
/// a resolution step already produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("invalid catalog config: {0}")]
    InvalidConfig(String),
    #[error("duplicate product id {0} in catalog input")]
    DuplicateId(ProductId),
    #[error("product name not in catalog: {0:?}")]
    NameNotFound(String),
    #[error("product id not in catalog: {0}")]
    IdNotFound(ProductId),
}
