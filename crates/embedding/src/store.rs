use std::collections::HashMap;

use catalog::{ProductId, Scored};

use crate::error::EmbeddingError;
use crate::space::EmbeddingSpace;

/// All embedding spaces, keyed by cluster id.
///
/// Populated once at startup from precomputed artifacts and shared read-only
/// across requests behind an `Arc`. Clusters are disjoint segments computed
/// upstream; a cluster id is valid here iff a space was loaded for it, and
/// different clusters may carry different dimensionalities.
#[derive(Default)]
pub struct EmbeddingStore {
    spaces: HashMap<u32, EmbeddingSpace>,
}

impl EmbeddingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_space(
        &mut self,
        cluster: u32,
        space: EmbeddingSpace,
    ) -> Result<(), EmbeddingError> {
        if self.spaces.contains_key(&cluster) {
            return Err(EmbeddingError::DuplicateCluster(cluster));
        }
        self.spaces.insert(cluster, space);
        Ok(())
    }

    pub fn space(&self, cluster: u32) -> Result<&EmbeddingSpace, EmbeddingError> {
        self.spaces
            .get(&cluster)
            .ok_or(EmbeddingError::UnknownCluster {
                cluster,
                configured: self.spaces.len(),
            })
    }

    pub fn has(&self, cluster: u32, id: ProductId) -> Result<bool, EmbeddingError> {
        Ok(self.space(cluster)?.has(id))
    }

    pub fn vector(&self, cluster: u32, id: ProductId) -> Result<&[f32], EmbeddingError> {
        self.space(cluster)?.vector(id)
    }

    pub fn nearest(
        &self,
        cluster: u32,
        query: &[f32],
        k: usize,
    ) -> Result<Vec<Scored>, EmbeddingError> {
        self.space(cluster)?.nearest(query, k)
    }

    /// Configured cluster ids, ascending.
    pub fn clusters(&self) -> Vec<u32> {
        let mut clusters: Vec<u32> = self.spaces.keys().copied().collect();
        clusters.sort_unstable();
        clusters
    }

    /// Number of configured spaces.
    pub fn len(&self) -> usize {
        self.spaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }
}
