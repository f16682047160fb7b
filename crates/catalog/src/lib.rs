//! Product catalog layer.
//!
//! Bidirectional mapping between canonical product names and stable product
//! identifiers, plus fuzzy resolution of free-text mentions against those
//! names. Downstream stages (resolver, engine) rely on this layer for every
//! text → id step.
//!
//! ## What we do
//!
//! - Hold products in insertion order with id and name lookup maps
//! - Fold names and mentions (NFKC, lowercase, whitespace collapse) so
//!   matching is case- and spacing-insensitive
//! - Score mentions against every canonical name with a ratio-based
//!   sequence matcher, cutoff-filtered and deterministically ordered
//! - Expose the scoring seam as [`SimilarityIndex`] so the text index and
//!   the vector index downstream are interchangeable behind one contract
//!
//! ## Pure function guarantee
//!
//! No I/O and no hidden state: the catalog is built once from a product
//! list and a config, and every lookup depends only on that. Same catalog +
//! same mention = same candidates forever.

mod catalog;
mod config;
mod error;
mod fuzzy;
mod normalize;
mod product;
mod similarity;

pub use crate::catalog::Catalog;
pub use crate::config::FuzzyConfig;
pub use crate::error::CatalogError;
pub use crate::fuzzy::{sequence_ratio, NameIndex};
pub use crate::normalize::fold;
pub use crate::product::{Product, ProductId};
pub use crate::similarity::{Scored, SimilarityIndex};
