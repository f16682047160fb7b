use crate::error::ServerResult;
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use engine::RecommendRequest;

/// Recommendation request body
#[derive(Debug, Deserialize)]
pub struct RecommendBody {
    /// Behavioral cluster the shopper belongs to
    pub cluster: u32,

    /// Free-text basket mentions, in entry order
    pub basket: Vec<String>,

    /// Number of recommendations wanted; the server default applies
    /// when omitted
    #[serde(default)]
    pub count: Option<usize>,
}

/// Resolve preview request body
#[derive(Debug, Deserialize)]
pub struct ResolveBody {
    pub basket: Vec<String>,
}

/// Resolve preview response
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub resolved: Vec<ResolvedItem>,
    pub collapse_hint: bool,
}

/// One resolved basket mention
#[derive(Debug, Serialize)]
pub struct ResolvedItem {
    pub id: u64,
    pub name: String,
}

/// Recommend products for a basket.
///
/// The body carries the cluster id, the basket's free-text mentions, and an
/// optional result count. The engine resolves mentions against the catalog,
/// vectorizes the basket with recency weighting, ranks the cluster's space
/// by cosine similarity, and assembles the final list with basket exclusion
/// and the configured fallback policy.
///
/// A basket that resolves to nothing usable is not an error: the response
/// comes back 200 with outcome `INSUFFICIENT_INPUT` and an empty list.
/// Invalid bodies are 400; an unknown cluster is 404.
pub async fn recommend(
    State(state): State<Arc<ServerState>>,
    Json(body): Json<RecommendBody>,
) -> ServerResult<impl IntoResponse> {
    let count = body.count.unwrap_or(state.config.default_count);
    let request = RecommendRequest::new(body.cluster, body.basket).with_count(count);

    let response = state.recommender.recommend(&request)?;
    Ok(Json(response))
}

/// Preview what a basket resolves to, without ranking.
///
/// Returns the resolved (id, name) pairs in basket order plus the collapse
/// hint, so callers can see which mentions were dropped and whether the
/// basket would be treated as single-intent. Resolution is total: an empty
/// or fully-unrecognized basket yields an empty list, not an error.
pub async fn resolve_basket(
    State(state): State<Arc<ServerState>>,
    Json(body): Json<ResolveBody>,
) -> ServerResult<impl IntoResponse> {
    let resolved = state
        .recommender
        .resolver()
        .resolve(state.catalog(), &body.basket);

    let mut items = Vec::with_capacity(resolved.len());
    for &id in &resolved.ids {
        let name = state.catalog().id_to_name(id)?.to_string();
        items.push(ResolvedItem { id: id.0, name });
    }

    Ok(Json(ResolveResponse {
        resolved: items,
        collapse_hint: resolved.collapse_hint,
    }))
}
