use crate::error::ServerResult;
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

/// Inventory response
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// Catalog size
    pub products: usize,

    /// Per-cluster space inventory, ascending cluster id
    pub clusters: Vec<ClusterStats>,
}

/// One embedding space's inventory
#[derive(Debug, Serialize)]
pub struct ClusterStats {
    pub cluster: u32,
    pub dimension: usize,
    pub vectors: usize,
    /// Whether this space answers queries through the HNSW graph
    pub accelerated: bool,
}

/// Catalog and embedding-space inventory
pub async fn stats(State(state): State<Arc<ServerState>>) -> ServerResult<impl IntoResponse> {
    let store = state.store();

    let mut clusters = Vec::with_capacity(store.len());
    for cluster in store.clusters() {
        let space = store.space(cluster)?;
        clusters.push(ClusterStats {
            cluster,
            dimension: space.dimension(),
            vectors: space.len(),
            accelerated: space.uses_ann(),
        });
    }

    Ok(Json(StatsResponse {
        products: state.catalog().len(),
        clusters,
    }))
}
