use std::cmp::Ordering;
use std::collections::HashMap;

use catalog::{ProductId, Scored, SimilarityIndex};

use crate::ann::{AnnConfig, AnnIndex};
use crate::error::EmbeddingError;

/// Cosine similarity in [-1.0, 1.0]; 0.0 when either vector has zero norm
/// or the lengths differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        return 0.0;
    }
    (dot / denom).clamp(-1.0, 1.0)
}

/// One cluster's embedding space: product id → fixed-dimension vector.
///
/// The dimension is set by the trained model that produced the vectors and
/// enforced on every insert. A space is populated at load time and read-only
/// afterwards; `nearest` is the vector flavor of [`SimilarityIndex`].
pub struct EmbeddingSpace {
    dimension: usize,
    ids: Vec<ProductId>,
    vectors: Vec<Vec<f32>>,
    by_id: HashMap<ProductId, usize>,
    ann: Option<AnnIndex>,
}

// Manual impl because the HNSW graph behind `ann` is not `Debug`.
impl std::fmt::Debug for EmbeddingSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingSpace")
            .field("dimension", &self.dimension)
            .field("len", &self.ids.len())
            .field("ann", &self.ann.is_some())
            .finish()
    }
}

impl EmbeddingSpace {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            ids: Vec::new(),
            vectors: Vec::new(),
            by_id: HashMap::new(),
            ann: None,
        }
    }

    /// Insert a product vector. Rejects dimension mismatches and duplicates.
    pub fn insert(&mut self, id: ProductId, vector: Vec<f32>) -> Result<(), EmbeddingError> {
        if vector.len() != self.dimension {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimension,
                got: vector.len(),
            });
        }
        if self.by_id.contains_key(&id) {
            return Err(EmbeddingError::DuplicateVector(id));
        }
        self.by_id.insert(id, self.ids.len());
        self.ids.push(id);
        self.vectors.push(vector);
        Ok(())
    }

    /// Build the optional HNSW graph once all vectors are inserted.
    /// A no-op for corpora the config keeps on the exact linear path.
    pub fn build_ann(&mut self, cfg: AnnConfig) {
        self.ann = AnnIndex::build(&self.vectors, cfg);
    }

    pub fn has(&self, id: ProductId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn vector(&self, id: ProductId) -> Result<&[f32], EmbeddingError> {
        self.by_id
            .get(&id)
            .and_then(|&pos| self.vectors.get(pos))
            .map(|v| v.as_slice())
            .ok_or(EmbeddingError::VectorNotFound(id))
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    pub fn uses_ann(&self) -> bool {
        self.ann.is_some()
    }

    /// The k nearest products to `query` by cosine similarity.
    ///
    /// Descending score; ties broken by ascending identifier so equal-score
    /// results are stable across runs. Excludes nothing: basket exclusion
    /// is the ranking layer's concern, keeping this a pure index.
    pub fn nearest(&self, query: &[f32], k: usize) -> Result<Vec<Scored>, EmbeddingError> {
        if query.len() != self.dimension {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimension,
                got: query.len(),
            });
        }
        if k == 0 || self.ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut results: Vec<Scored> = match &self.ann {
            Some(ann) => ann
                .search(query, k)
                .into_iter()
                .filter_map(|(pos, score)| {
                    self.ids.get(pos).map(|&id| Scored { id, score })
                })
                .collect(),
            None => self
                .ids
                .iter()
                .zip(self.vectors.iter())
                .map(|(&id, vector)| Scored {
                    id,
                    score: cosine_similarity(query, vector),
                })
                .collect(),
        };

        results.sort_unstable_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        results.truncate(k);
        Ok(results)
    }
}

impl SimilarityIndex for EmbeddingSpace {
    type Query = [f32];

    /// Trait view of [`EmbeddingSpace::nearest`]; a dimension-mismatched
    /// query yields an empty result instead of an error here.
    fn top_k(&self, query: &[f32], k: usize) -> Vec<Scored> {
        self.nearest(query, k).unwrap_or_default()
    }

    fn len(&self) -> usize {
        self.ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space_with(vectors: &[(u64, &[f32])]) -> EmbeddingSpace {
        let dim = vectors.first().map(|(_, v)| v.len()).unwrap_or(0);
        let mut space = EmbeddingSpace::new(dim);
        for (id, v) in vectors {
            space
                .insert(ProductId(*id), v.to_vec())
                .expect("insert fixture vector");
        }
        space
    }

    #[test]
    fn cosine_similarity_basics() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn insert_enforces_dimension() {
        let mut space = EmbeddingSpace::new(3);
        let err = space
            .insert(ProductId(1), vec![1.0, 0.0])
            .expect_err("wrong dimension");
        assert_eq!(err, EmbeddingError::DimensionMismatch { expected: 3, got: 2 });
    }

    #[test]
    fn insert_rejects_duplicates() {
        let mut space = EmbeddingSpace::new(2);
        space.insert(ProductId(1), vec![1.0, 0.0]).expect("first");
        let err = space
            .insert(ProductId(1), vec![0.0, 1.0])
            .expect_err("duplicate");
        assert_eq!(err, EmbeddingError::DuplicateVector(ProductId(1)));
    }

    #[test]
    fn vector_lookup_and_membership() {
        let space = space_with(&[(1, &[1.0, 0.0]), (2, &[0.0, 1.0])]);
        assert!(space.has(ProductId(1)));
        assert!(!space.has(ProductId(9)));
        assert_eq!(space.vector(ProductId(2)).expect("known"), &[0.0, 1.0]);
        assert_eq!(
            space.vector(ProductId(9)),
            Err(EmbeddingError::VectorNotFound(ProductId(9)))
        );
    }

    #[test]
    fn nearest_orders_by_score_then_id() {
        let space = space_with(&[(9, &[1.0, 0.0]), (3, &[1.0, 0.0]), (5, &[0.0, 1.0])]);
        let hits = space.nearest(&[1.0, 0.0], 3).expect("nearest");
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].id, ProductId(3));
        assert_eq!(hits[1].id, ProductId(9));
        assert_eq!(hits[2].id, ProductId(5));
        assert!((hits[0].score - hits[1].score).abs() < f32::EPSILON);
    }

    #[test]
    fn nearest_truncates_to_k() {
        let space = space_with(&[(1, &[1.0, 0.0]), (2, &[0.9, 0.1]), (3, &[0.0, 1.0])]);
        let hits = space.nearest(&[1.0, 0.0], 2).expect("nearest");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, ProductId(1));
    }

    #[test]
    fn nearest_zero_k_short_circuits() {
        let space = space_with(&[(1, &[1.0, 0.0])]);
        assert!(space.nearest(&[1.0, 0.0], 0).expect("nearest").is_empty());
    }

    #[test]
    fn nearest_rejects_wrong_dimension() {
        let space = space_with(&[(1, &[1.0, 0.0])]);
        let err = space.nearest(&[1.0, 0.0, 0.0], 2).expect_err("dimension");
        assert!(matches!(err, EmbeddingError::DimensionMismatch { .. }));
    }

    #[test]
    fn ann_and_linear_paths_agree_on_clear_winners() {
        let entries: Vec<(u64, Vec<f32>)> = (0..32)
            .map(|i| {
                let mut v = vec![0.0f32; 4];
                v[(i % 4) as usize] = 1.0 + (i / 4) as f32;
                (i, v)
            })
            .collect();

        let mut linear = EmbeddingSpace::new(4);
        let mut accelerated = EmbeddingSpace::new(4);
        for (id, v) in &entries {
            linear.insert(ProductId(*id), v.clone()).expect("insert");
            accelerated.insert(ProductId(*id), v.clone()).expect("insert");
        }
        accelerated.build_ann(AnnConfig::default().with_min_vectors(1));
        assert!(accelerated.uses_ann());
        assert!(!linear.uses_ann());

        let query = [0.0, 0.0, 1.0, 0.0];
        let exact = linear.nearest(&query, 4).expect("linear");
        let approx = accelerated.nearest(&query, 4).expect("ann");
        // Axis-2 vectors all score 1.0; both paths must agree on that set.
        assert!(exact.iter().all(|s| s.id.0 % 4 == 2));
        assert!(approx.iter().all(|s| s.score > 0.99));
    }
}
