use crate::artifacts::load_artifacts;
use crate::config::{FallbackKind, ServerConfig};
use crate::error::ServerResult;
use catalog::Catalog;
use embedding::{AnnConfig, EmbeddingStore};
use engine::{FallbackSource, Recommender};
use resolver::Resolver;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Recommender instance (shared across requests)
    pub recommender: Arc<Recommender>,
}

impl ServerState {
    /// Create new server state
    ///
    /// Loads the artifact bundle from disk and wires the recommender with
    /// the knobs the config forwards. Everything here is immutable after
    /// construction; requests share it read-only.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let artifacts = load_artifacts(
            &config.artifacts_path,
            config.fuzzy_config(),
            AnnConfig::default(),
        )?;

        let resolver = Resolver::new(config.resolver_config())?;

        let fallback = match config.fallback_source {
            FallbackKind::None => FallbackSource::None,
            FallbackKind::Popularity => FallbackSource::Popularity(artifacts.popularity),
        };

        let recommender = Recommender::new(
            Arc::new(artifacts.catalog),
            Arc::new(artifacts.store),
            resolver,
            config.recommend_config(),
        )
        .with_fallback(fallback);

        Ok(Self {
            config: Arc::new(config),
            recommender: Arc::new(recommender),
        })
    }

    pub fn catalog(&self) -> &Catalog {
        self.recommender.catalog()
    }

    pub fn store(&self) -> &EmbeddingStore {
        self.recommender.store()
    }
}
