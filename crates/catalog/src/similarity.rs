use crate::product::ProductId;

/// A scored identifier returned from a similarity lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scored {
    pub id: ProductId,
    pub score: f32,
}

/// Similarity-scored lookup over a fixed corpus.
///
/// Both lookup flavors in the pipeline implement this seam: the catalog's
/// [`NameIndex`](crate::NameIndex) scores free text against canonical names,
/// and a cluster's embedding space scores a query vector against stored
/// product vectors. Either side can be swapped for an optimized variant
/// without the orchestration layer noticing.
///
/// Contract: at most `k` results, ordered by descending score; ties are
/// broken deterministically (each implementation documents its rule).
pub trait SimilarityIndex {
    type Query: ?Sized;

    /// Top `k` corpus entries most similar to `query`.
    fn top_k(&self, query: &Self::Query, k: usize) -> Vec<Scored>;

    /// Number of entries in the corpus.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
