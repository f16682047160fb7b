//! Per-cluster embedding spaces.
//!
//! Each behavioral cluster trained its own item-embedding model upstream;
//! this crate holds the resulting vectors and answers the only three
//! questions the engine asks: is this product embedded here, what is its
//! vector, and which products sit closest to a query vector.
//!
//! ## What we do
//!
//! - One [`EmbeddingSpace`] per cluster, fixed dimension enforced on insert
//! - Cosine nearest-neighbor search with deterministic ordering
//!   (descending score, ascending id on ties)
//! - Optional HNSW acceleration for large spaces, exact linear scan below
//!   the threshold; invisible to callers either way
//! - [`EmbeddingStore`] keyed by cluster id, the process-wide read-only
//!   state loaded once at startup
//!
//! `nearest` excludes nothing and never special-cases the caller's basket;
//! it is a pure index. Exclusion and zero-vector handling live in the
//! ranking layer.

mod ann;
mod error;
mod space;
mod store;

pub use crate::ann::{AnnConfig, AnnIndex};
pub use crate::error::EmbeddingError;
pub use crate::space::{cosine_similarity, EmbeddingSpace};
pub use crate::store::EmbeddingStore;
