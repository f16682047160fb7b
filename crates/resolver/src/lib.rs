//! Basket resolution: free-text mentions to product identifiers.
//!
//! What we do:
//! - run each mention through the catalog's fuzzy name index and keep the
//!   top candidate, in basket order
//! - drop mentions with no candidate above the cutoff (unknown items are
//!   normal input, not errors)
//! - flag near-duplicate baskets with a collapse hint so vectorization can
//!   avoid over-weighting one paraphrased product
//!
//! Pure function guarantee: resolution never fails and never mutates the
//! catalog. The only fallible operation is config validation at
//! construction time.

mod config;
mod error;
mod resolve;

pub use config::ResolverConfig;
pub use error::ResolverError;
pub use resolve::{ResolvedBasket, Resolver};
