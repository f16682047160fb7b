use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::artifacts::ArtifactError;
use engine::RecommendError;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unknown cluster {0}")]
    UnknownCluster(u32),

    #[error("artifact error: {0}")]
    Artifacts(#[from] ArtifactError),

    #[error("catalog error: {0}")]
    Catalog(#[from] catalog::CatalogError),

    #[error("embedding error: {0}")]
    Embedding(#[from] embedding::EmbeddingError),

    #[error("internal server error: {0}")]
    Internal(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("not found")]
    NotFound,
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::UnknownCluster(_) | ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Artifacts(_)
            | ServerError::Catalog(_)
            | ServerError::Embedding(_)
            | ServerError::Internal(_)
            | ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    fn error_code(&self) -> &'static str {
        match self {
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::UnknownCluster(_) => "UNKNOWN_CLUSTER",
            ServerError::Artifacts(_) => "ARTIFACT_ERROR",
            ServerError::Catalog(_) => "CATALOG_ERROR",
            ServerError::Embedding(_) => "EMBEDDING_ERROR",
            ServerError::Internal(_) => "INTERNAL_ERROR",
            ServerError::Config(_) => "CONFIG_ERROR",
            ServerError::NotFound => "NOT_FOUND",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code().to_string();
        let message = self.to_string();

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Engine outcomes that are request failures, mapped to their HTTP class.
///
/// `INSUFFICIENT_INPUT` never reaches this conversion: the engine reports it
/// through the outcome tag, not the error path.
impl From<RecommendError> for ServerError {
    fn from(err: RecommendError) -> Self {
        match err {
            RecommendError::InvalidInput(msg) => ServerError::BadRequest(msg),
            RecommendError::UnknownCluster { cluster, .. } => ServerError::UnknownCluster(cluster),
            RecommendError::Catalog(err) => ServerError::Catalog(err),
            RecommendError::Embedding(err) => ServerError::Embedding(err),
        }
    }
}

impl From<resolver::ResolverError> for ServerError {
    fn from(err: resolver::ResolverError) -> Self {
        ServerError::Config(err.to_string())
    }
}
