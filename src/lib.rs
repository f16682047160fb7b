//! Workspace umbrella crate for the aisle basket recommender.
//!
//! This crate stitches catalog resolution, basket vectorization, and
//! embedding-space ranking together so callers can turn a shopper's
//! free-text basket into ranked product names with a single API entry point.

pub mod config;

pub use config::{AisleConfig, ConfigLoadError};

pub use basket::{position_weights, vectorize};
pub use catalog::{fold, sequence_ratio, Catalog, CatalogError, FuzzyConfig, Product, ProductId};
pub use embedding::{cosine_similarity, AnnConfig, EmbeddingError, EmbeddingSpace, EmbeddingStore};
pub use engine::{
    rank, set_recommend_metrics, FallbackKind, FallbackSource, InsufficiencyReason, Outcome,
    PopularityTable, RecommendConfig, RecommendError, RecommendMetrics, RecommendRequest,
    RecommendResponse, Recommender,
};
pub use resolver::{ResolvedBasket, Resolver, ResolverConfig, ResolverError};

use std::sync::Arc;

use thiserror::Error;

/// Errors that can occur while assembling pipeline stages or running a
/// basket through them.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("catalog stage: {0}")]
    Catalog(#[from] CatalogError),

    #[error("embedding stage: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("resolver stage: {0}")]
    Resolver(#[from] ResolverError),

    #[error("recommend: {0}")]
    Recommend(#[from] RecommendError),
}

/// Stitch an already-built catalog and embedding store into a ready
/// [`Recommender`] using one pipeline config.
///
/// The popularity table comes from whatever loaded the artifacts; it is
/// consulted only when `config.fallback` selects the popularity policy,
/// so callers without purchase-frequency data pass an empty table.
pub fn build_recommender(
    catalog: Catalog,
    store: EmbeddingStore,
    popularity: PopularityTable,
    config: &AisleConfig,
) -> Result<Recommender, PipelineError> {
    let resolver = Resolver::new(config.resolver.clone())?;
    let fallback = match config.fallback {
        FallbackKind::None => FallbackSource::None,
        FallbackKind::Popularity => FallbackSource::Popularity(popularity),
    };
    Ok(Recommender::new(
        Arc::new(catalog),
        Arc::new(store),
        resolver,
        config.engine.clone(),
    )
    .with_fallback(fallback))
}

/// Convenience helper that runs a misspelled two-item basket through a small
/// built-in pantry catalog. Useful for demos and integration smoke tests.
pub fn pantry_demo(config: &AisleConfig) -> Result<RecommendResponse, PipelineError> {
    const PANTRY: [(u64, &str, [f32; 4]); 10] = [
        (1, "Milk", [0.9, 0.1, 0.0, 0.0]),
        (2, "Whole Milk", [0.85, 0.15, 0.0, 0.0]),
        (3, "Yogurt", [0.8, 0.2, 0.1, 0.0]),
        (4, "Butter", [0.7, 0.1, 0.3, 0.0]),
        (5, "Cheese", [0.75, 0.05, 0.25, 0.0]),
        (6, "Bread", [0.1, 0.9, 0.2, 0.0]),
        (7, "Eggs", [0.3, 0.5, 0.4, 0.0]),
        (8, "Apples", [0.1, 0.2, 0.9, 0.0]),
        (9, "Coffee", [0.0, 0.1, 0.1, 0.9]),
        (10, "Tea", [0.0, 0.05, 0.15, 0.85]),
    ];

    let products = PANTRY
        .iter()
        .map(|&(id, name, _)| Product::new(id, name))
        .collect();
    let catalog = Catalog::new(products, config.fuzzy.clone())?;

    let mut space = EmbeddingSpace::new(4);
    for &(id, _, vector) in &PANTRY {
        space.insert(ProductId(id), vector.to_vec())?;
    }
    space.build_ann(config.ann);

    let mut store = EmbeddingStore::new();
    store.insert_space(1, space)?;

    let recommender = build_recommender(catalog, store, PopularityTable::new(), config)?;
    let request = RecommendRequest::new(1, vec!["milk".into(), "bred".into()]);
    Ok(recommender.recommend(&request)?)
}
