//! # Aisle Engine (`engine`)
//!
//! ## Purpose
//!
//! `engine` sits on top of the leaf crates (`catalog`, `embedding`,
//! `resolver`, `basket`) and turns a free-text basket plus a cluster id
//! into an ordered list of recommended product names. It owns the
//! similarity ranker, the exclusion/dedup policy, the popularity fallback,
//! and the outcome taxonomy.
//!
//! In a typical deployment you will:
//! - Load the catalog and per-cluster embedding spaces once at startup.
//! - Build a [`Recommender`] over `Arc` handles to that state and share it
//!   across request handlers.
//!
//! ## Core Types
//!
//! - [`RecommendRequest`]: cluster id + basket mentions + requested count.
//! - [`RecommendResponse`]: outcome tag + ordered display names.
//! - [`Outcome`]: `OK`, `OK_PARTIAL`, or `INSUFFICIENT_INPUT`; the last
//!   is a normal terminal outcome, never an error.
//! - [`FallbackSource`]: tagged top-up policy, `None` or `Popularity` with
//!   its per-cluster [`PopularityTable`].
//! - [`Recommender`]: the assembler wiring all stages together.
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//! use catalog::{Catalog, FuzzyConfig, Product, ProductId};
//! use embedding::{EmbeddingSpace, EmbeddingStore};
//! use engine::{RecommendConfig, RecommendRequest, Recommender};
//! use resolver::{Resolver, ResolverConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Arc::new(Catalog::new(
//!     vec![Product::new(1, "Milk"), Product::new(2, "Bread")],
//!     FuzzyConfig::default(),
//! )?);
//!
//! let mut space = EmbeddingSpace::new(2);
//! space.insert(ProductId(1), vec![1.0, 0.0])?;
//! space.insert(ProductId(2), vec![0.0, 1.0])?;
//! let mut store = EmbeddingStore::default();
//! store.insert_space(0, space)?;
//!
//! let engine = Recommender::new(
//!     catalog,
//!     Arc::new(store),
//!     Resolver::new(ResolverConfig::default())?,
//!     RecommendConfig::default(),
//! );
//!
//! let response = engine.recommend(&RecommendRequest::new(0, vec!["milk".into()]))?;
//! println!("{:?}: {:?}", response.outcome, response.recommendations);
//! # Ok(())
//! # }
//! ```
//!
//! ## Observability
//!
//! Install a [`RecommendMetrics`] implementation via
//! [`set_recommend_metrics`] to record per-request outcome, latency, and
//! result count; insufficient-input outcomes carry an
//! [`InsufficiencyReason`] so the two causes stay distinguishable. The
//! engine also emits `tracing` events with structured fields (cluster,
//! resolved, filtered, outcome, reason).

pub mod engine;
pub mod metrics;
pub mod popularity;
pub mod rank;
pub mod types;

pub use crate::engine::Recommender;
pub use crate::metrics::{set_recommend_metrics, RecommendMetrics};
pub use crate::popularity::{FallbackKind, FallbackSource, PopularityTable};
pub use crate::rank::rank;
pub use crate::types::{
    InsufficiencyReason, Outcome, RecommendConfig, RecommendError, RecommendRequest,
    RecommendResponse,
};
