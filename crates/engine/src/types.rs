use catalog::CatalogError;
use embedding::EmbeddingError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single recommendation request.
///
/// `RecommendRequest` is serde-friendly so front ends can deserialize it
/// straight off the wire; `count` falls back to the default when omitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendRequest {
    /// Behavioral cluster the shopper was assigned upstream.
    pub cluster: u32,
    /// Free-text basket mentions in submission order.
    pub basket: Vec<String>,
    /// Number of recommendations wanted.
    #[serde(default = "RecommendRequest::default_count")]
    pub count: usize,
}

impl RecommendRequest {
    pub(crate) fn default_count() -> usize {
        5
    }

    /// Request with the default count.
    pub fn new(cluster: u32, basket: Vec<String>) -> Self {
        Self {
            cluster,
            basket,
            count: Self::default_count(),
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }
}

/// Terminal outcome of a recommendation request.
///
/// `InsufficientInput` is a normal outcome, not an error: a basket with no
/// recognizable items is an expected, common case.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    /// The full requested count was produced.
    Ok,
    /// Fewer than `count` results remained after exclusion.
    OkPartial,
    /// No usable basket signal; the recommendation list is empty.
    InsufficientInput,
}

/// Why a request terminated with [`Outcome::InsufficientInput`].
///
/// The user-facing result is identical for both causes; the distinction
/// exists for logs and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsufficiencyReason {
    /// No basket mention matched any catalog name above the cutoff.
    NoCatalogMatch,
    /// Mentions matched the catalog, but none of the matched products carry
    /// an embedding in the requested cluster.
    NoEmbeddingCoverage,
}

impl InsufficiencyReason {
    /// Stable label used in structured log fields and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoCatalogMatch => "no_catalog_match",
            Self::NoEmbeddingCoverage => "no_embedding_coverage",
        }
    }
}

/// Recommendation result handed back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendResponse {
    pub outcome: Outcome,
    /// Product display names, best first, at most `count` entries.
    pub recommendations: Vec<String>,
    /// Human-readable note for the insufficient-input outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Assembler tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendConfig {
    /// Extra neighbors fetched beyond `count + |exclude|` so exclusion
    /// cannot starve the ranked list.
    #[serde(default = "RecommendConfig::default_rank_margin")]
    pub rank_margin: usize,
}

impl RecommendConfig {
    pub(crate) fn default_rank_margin() -> usize {
        5
    }

    pub fn with_rank_margin(mut self, margin: usize) -> Self {
        self.rank_margin = margin;
        self
    }
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            rank_margin: Self::default_rank_margin(),
        }
    }
}

/// Errors produced by the recommendation engine.
///
/// `Catalog` and `Embedding` wrap internal invariant violations: an
/// identifier the Resolver produced that the Catalog or Store cannot look
/// up again. Front ends treat those as server faults and the first two
/// variants as client faults.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecommendError {
    /// Malformed request; fails fast and is never retried.
    #[error("invalid request: {0}")]
    InvalidInput(String),
    /// The requested cluster has no embedding space.
    #[error("unknown cluster {cluster} ({configured} spaces configured)")]
    UnknownCluster { cluster: u32, configured: usize },
    /// Catalog lookup broke an internal invariant.
    #[error("catalog lookup failed: {0}")]
    Catalog(#[from] CatalogError),
    /// Embedding lookup broke an internal invariant.
    #[error("embedding lookup failed: {0}")]
    Embedding(EmbeddingError),
}

impl From<EmbeddingError> for RecommendError {
    fn from(err: EmbeddingError) -> Self {
        match err {
            // Keep the cluster failure distinct: it is a client fault while
            // every other embedding error is a server fault.
            EmbeddingError::UnknownCluster {
                cluster,
                configured,
            } => RecommendError::UnknownCluster {
                cluster,
                configured,
            },
            other => RecommendError::Embedding(other),
        }
    }
}
