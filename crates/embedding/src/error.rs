use thiserror::Error;

use catalog::ProductId;

/// Errors produced by embedding spaces and the store.
///
/// `VectorNotFound` signals an internal invariant violation when it surfaces
/// from the recommendation path: the engine only asks for vectors whose
/// membership it has already checked.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmbeddingError {
    #[error("invalid embedding config: {0}")]
    InvalidConfig(String),
    #[error("unknown cluster {cluster} ({configured} spaces configured)")]
    UnknownCluster { cluster: u32, configured: usize },
    #[error("cluster {0} already has a space")]
    DuplicateCluster(u32),
    #[error("no vector for product {0} in this space")]
    VectorNotFound(ProductId),
    #[error("product {0} already has a vector in this space")]
    DuplicateVector(ProductId),
    #[error("vector dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}
