//! Artifact bundle loading.
//!
//! The recommender's state (catalog, per-cluster vectors, popularity lists)
//! is precomputed offline and shipped as one JSON document. This module
//! reads and validates that document at startup; nothing else in the server
//! touches disk. Violations are load-time errors so a bad bundle kills the
//! process before it serves a single request.

use std::collections::{HashMap, HashSet};
use std::fs;

use serde::Deserialize;
use tracing::{info, warn};

use catalog::{Catalog, CatalogError, FuzzyConfig, Product, ProductId};
use embedding::{AnnConfig, EmbeddingError, EmbeddingSpace, EmbeddingStore};
use engine::PopularityTable;

/// Artifact bundle errors
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read artifact bundle at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse artifact bundle: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog rejected artifact products: {0}")]
    Catalog(#[from] CatalogError),

    #[error("embedding store rejected artifact vectors: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("cluster {cluster} vector key {key:?} is not a numeric product id")]
    BadVectorKey { cluster: u32, key: String },

    #[error("cluster {cluster} vector for product {id} has no catalog entry")]
    UnknownVectorProduct { cluster: u32, id: u64 },

    #[error("cluster {cluster} popular entry {id} has no catalog entry")]
    UnknownPopularProduct { cluster: u32, id: u64 },
}

/// On-disk shape of the artifact bundle
#[derive(Debug, Deserialize)]
pub struct ArtifactBundle {
    pub products: Vec<ProductEntry>,
    #[serde(default)]
    pub clusters: Vec<ClusterEntry>,
}

/// One catalog product
#[derive(Debug, Deserialize)]
pub struct ProductEntry {
    pub id: u64,
    pub name: String,
}

/// One cluster's embedding space plus its optional popularity list
#[derive(Debug, Deserialize)]
pub struct ClusterEntry {
    pub cluster: u32,
    pub dimension: usize,

    /// Product id (as a JSON object key) to embedding vector
    #[serde(default)]
    pub vectors: HashMap<String, Vec<f32>>,

    /// Product ids by purchase frequency, most-purchased first
    #[serde(default)]
    pub popular: Vec<u64>,
}

/// Everything the recommender needs, validated and ready to share.
pub struct LoadedArtifacts {
    pub catalog: Catalog,
    pub store: EmbeddingStore,
    pub popularity: PopularityTable,
}

// Manual impl because the embedding store's ANN index is not `Debug`.
impl std::fmt::Debug for LoadedArtifacts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedArtifacts")
            .field("catalog_len", &self.catalog.len())
            .field("store_len", &self.store.len())
            .field("popularity_len", &self.popularity.len())
            .finish()
    }
}

/// Read and validate the bundle at `path`.
pub fn load_artifacts(
    path: &str,
    fuzzy: FuzzyConfig,
    ann: AnnConfig,
) -> Result<LoadedArtifacts, ArtifactError> {
    let raw = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_string(),
        source,
    })?;
    let bundle: ArtifactBundle = serde_json::from_str(&raw)?;
    let loaded = build_artifacts(bundle, fuzzy, ann)?;

    info!(
        path,
        products = loaded.catalog.len(),
        clusters = loaded.store.len(),
        popularity_clusters = loaded.popularity.len(),
        "artifact bundle loaded"
    );

    Ok(loaded)
}

/// Validate a parsed bundle and build the shared state from it.
///
/// Duplicate product ids are rejected outright. Duplicate display names keep
/// the first mapping and log a warning. Every vector key and popular entry
/// must name a catalog product, and every vector must match its cluster's
/// declared dimension.
pub fn build_artifacts(
    bundle: ArtifactBundle,
    fuzzy: FuzzyConfig,
    ann: AnnConfig,
) -> Result<LoadedArtifacts, ArtifactError> {
    let mut seen_names = HashSet::new();
    for entry in &bundle.products {
        if !seen_names.insert(entry.name.as_str()) {
            warn!(
                id = entry.id,
                name = %entry.name,
                "duplicate product name in artifacts; first mapping wins"
            );
        }
    }

    let products: Vec<Product> = bundle
        .products
        .iter()
        .map(|entry| Product::new(entry.id, entry.name.as_str()))
        .collect();
    let catalog = Catalog::new(products, fuzzy)?;

    let mut store = EmbeddingStore::new();
    let mut popularity = PopularityTable::new();

    for cluster_entry in bundle.clusters {
        let cluster = cluster_entry.cluster;

        // Parse and sort keys so load order is reproducible.
        let mut entries = Vec::with_capacity(cluster_entry.vectors.len());
        for (key, vector) in cluster_entry.vectors {
            let id: u64 = key
                .parse()
                .map_err(|_| ArtifactError::BadVectorKey { cluster, key })?;
            entries.push((id, vector));
        }
        entries.sort_unstable_by_key(|(id, _)| *id);

        let mut space = EmbeddingSpace::new(cluster_entry.dimension);
        for (id, vector) in entries {
            if !catalog.contains_id(ProductId(id)) {
                return Err(ArtifactError::UnknownVectorProduct { cluster, id });
            }
            space.insert(ProductId(id), vector)?;
        }
        space.build_ann(ann);
        store.insert_space(cluster, space)?;

        if !cluster_entry.popular.is_empty() {
            for &id in &cluster_entry.popular {
                if !catalog.contains_id(ProductId(id)) {
                    return Err(ArtifactError::UnknownPopularProduct { cluster, id });
                }
            }
            popularity.insert(
                cluster,
                cluster_entry.popular.into_iter().map(ProductId).collect(),
            );
        }
    }

    Ok(LoadedArtifacts {
        catalog,
        store,
        popularity,
    })
}
