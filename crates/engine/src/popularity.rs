use std::collections::HashMap;

use catalog::ProductId;
use serde::{Deserialize, Serialize};

/// Per-cluster purchase-frequency ranking, most purchased first.
///
/// Loaded alongside the embedding artifacts and consulted only by the
/// popularity fallback. Popularity data is optional per cluster; clusters
/// without it simply have no entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PopularityTable {
    ranked: HashMap<u32, Vec<ProductId>>,
}

impl PopularityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the ranking for one cluster.
    pub fn insert(&mut self, cluster: u32, ranked: Vec<ProductId>) {
        self.ranked.insert(cluster, ranked);
    }

    /// Most-purchased ids for `cluster`, best first; empty when unknown.
    pub fn top(&self, cluster: u32) -> &[ProductId] {
        self.ranked.get(&cluster).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

/// Top-up source consulted when ranking alone cannot fill the requested
/// count. Modeled as a tagged choice so both policies share the same
/// exclusion contract in the assembler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FallbackSource {
    /// No top-up; a shortfall yields `OK_PARTIAL`.
    #[default]
    None,
    /// The cluster's most-purchased products, minus anything the shopper
    /// already has.
    Popularity(PopularityTable),
}

/// Serializable tag naming a [`FallbackSource`] policy.
///
/// Config files and environment variables carry this tag; the ranking
/// table itself comes from the artifact bundle, and whoever loads the
/// bundle joins the two into a `FallbackSource`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackKind {
    /// Shortfalls stay partial.
    #[default]
    None,
    /// Shortfalls are filled from the cluster's purchase-frequency list.
    Popularity,
}
