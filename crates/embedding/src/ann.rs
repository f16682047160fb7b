//! Optional HNSW acceleration for large embedding spaces.
//!
//! A space scans linearly by default, which is exact and fast enough for the
//! catalog sizes this engine sees. Spaces past a configurable vector count
//! build a Hierarchical Navigable Small World graph instead and trade a
//! little recall for sub-linear queries. The choice is made once at load
//! time and is invisible to callers: both paths feed the same deterministic
//! ordering in [`EmbeddingSpace::nearest`](crate::EmbeddingSpace::nearest).

use hnsw_rs::prelude::*;
use serde::{Deserialize, Serialize};

/// HNSW construction and search parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AnnConfig {
    /// Number of neighbors per graph node (higher = better recall, slower build).
    #[serde(default = "AnnConfig::default_m")]
    pub m: usize,
    /// Candidate list size during construction.
    #[serde(default = "AnnConfig::default_ef_construction")]
    pub ef_construction: usize,
    /// Candidate list size during search.
    #[serde(default = "AnnConfig::default_ef_search")]
    pub ef_search: usize,
    /// Whether acceleration may be used at all.
    #[serde(default = "AnnConfig::default_enabled")]
    pub enabled: bool,
    /// Minimum vector count before a graph is built. Below this, linear
    /// scan wins on both speed and exactness.
    #[serde(default = "AnnConfig::default_min_vectors")]
    pub min_vectors: usize,
}

impl AnnConfig {
    pub(crate) fn default_m() -> usize {
        16
    }

    pub(crate) fn default_ef_construction() -> usize {
        200
    }

    pub(crate) fn default_ef_search() -> usize {
        50
    }

    pub(crate) fn default_enabled() -> bool {
        true
    }

    pub(crate) fn default_min_vectors() -> usize {
        1000
    }

    pub fn with_m(mut self, m: usize) -> Self {
        self.m = m;
        self
    }

    pub fn with_ef_construction(mut self, ef: usize) -> Self {
        self.ef_construction = ef;
        self
    }

    pub fn with_ef_search(mut self, ef: usize) -> Self {
        self.ef_search = ef;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_min_vectors(mut self, min: usize) -> Self {
        self.min_vectors = min;
        self
    }

    /// Whether a corpus of `num_vectors` should get a graph.
    pub fn should_accelerate(&self, num_vectors: usize) -> bool {
        self.enabled && num_vectors >= self.min_vectors
    }
}

impl Default for AnnConfig {
    fn default() -> Self {
        Self {
            m: Self::default_m(),
            ef_construction: Self::default_ef_construction(),
            ef_search: Self::default_ef_search(),
            enabled: Self::default_enabled(),
            min_vectors: Self::default_min_vectors(),
        }
    }
}

// HNSW needs a handful of points before the layered graph makes sense.
const MIN_GRAPH_POINTS: usize = 10;

/// HNSW graph over a space's vectors, keyed by vector position.
pub struct AnnIndex {
    cfg: AnnConfig,
    hnsw: Hnsw<'static, f32, DistCosine>,
}

impl AnnIndex {
    /// Build a graph over `vectors`, or `None` when the config rules
    /// acceleration out for this corpus size.
    pub fn build(vectors: &[Vec<f32>], cfg: AnnConfig) -> Option<Self> {
        let nb_elem = vectors.len();
        if !cfg.should_accelerate(nb_elem) || nb_elem < MIN_GRAPH_POINTS {
            return None;
        }

        let nb_layer = 16.min((nb_elem as f32).ln().trunc() as usize);
        let hnsw = Hnsw::<f32, DistCosine>::new(
            cfg.m,
            nb_elem,
            nb_layer,
            cfg.ef_construction,
            DistCosine {},
        );

        let data: Vec<(&Vec<f32>, usize)> =
            vectors.iter().enumerate().map(|(i, v)| (v, i)).collect();
        hnsw.parallel_insert(&data);

        Some(Self { cfg, hnsw })
    }

    /// Approximate top-k as `(vector position, cosine similarity)` pairs.
    ///
    /// DistCosine yields `1 - cos`, so similarity is recovered as `1 - d`
    /// and may be negative for opposing vectors.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<(usize, f32)> {
        let ef = self.cfg.ef_search.max(k);
        self.hnsw
            .search(query, k, ef)
            .into_iter()
            .map(|n| (n.get_origin_id(), (1.0 - n.distance).clamp(-1.0, 1.0)))
            .collect()
    }

    pub fn config(&self) -> &AnnConfig {
        &self.cfg
    }
}
