//! Basket vectorization: a resolved basket to one query vector.
//!
//! What we do:
//! - weight each basket position with a softmax over its index, so recent
//!   additions dominate the query direction
//! - accumulate the weighted embeddings in f64 and emit f32
//!
//! The aggregation is deliberately order-sensitive: `[milk, bread]` and
//! `[bread, milk]` produce different vectors. Degenerate inputs stay
//! total: an empty id list yields the zero vector (callers treat that as
//! "nothing to rank") and a one-item basket passes its stored embedding
//! through untouched.

mod weights;

pub use weights::position_weights;

use ndarray::Array1;

use catalog::ProductId;
use embedding::{EmbeddingError, EmbeddingSpace};

/// Aggregate the embeddings of `ids` into a single query vector.
///
/// Every id must have a vector in `space`; callers filter baskets against
/// embedding coverage first, so a missing vector here surfaces as
/// [`EmbeddingError::VectorNotFound`].
pub fn vectorize(space: &EmbeddingSpace, ids: &[ProductId]) -> Result<Vec<f32>, EmbeddingError> {
    match ids {
        [] => Ok(vec![0.0; space.dimension()]),
        [only] => Ok(space.vector(*only)?.to_vec()),
        _ => {
            let weights = position_weights(ids.len());
            let mut acc = Array1::<f64>::zeros(space.dimension());
            for (id, &w) in ids.iter().zip(&weights) {
                let stored = space.vector(*id)?;
                for (slot, &component) in acc.iter_mut().zip(stored) {
                    *slot += w * f64::from(component);
                }
            }
            Ok(acc.mapv(|x| x as f32).to_vec())
        }
    }
}
