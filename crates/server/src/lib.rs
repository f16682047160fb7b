//! Aisle Server - HTTP REST API for basket recommendations
//!
//! This crate exposes the aisle recommendation engine over a REST API. It
//! supports:
//!
//! - **Recommendation**: rank a cluster's products against a free-text basket
//! - **Resolve Preview**: show what a basket resolves to before ranking
//! - **Inventory**: catalog size and per-cluster embedding-space stats
//! - **Health**: liveness and readiness probes
//!
//! # Features
//!
//! - **Middleware**: Compression, CORS, request ID tracking, structured logging
//! - **Configuration**: Environment variable and file-based configuration
//! - **Artifacts**: One validated JSON bundle holding catalog, vectors, and
//!   popularity lists, loaded once at startup
//! - **Error Handling**: Error responses with stable error codes
//! - **Graceful Shutdown**: Proper signal handling for production deployments
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `POST /api/v1/recommend` - Recommend products for a basket
//! - `POST /api/v1/resolve` - Preview basket resolution
//! - `GET /api/v1/stats` - Catalog and cluster inventory

pub mod artifacts;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use artifacts::{load_artifacts, ArtifactBundle, ArtifactError, LoadedArtifacts};
pub use config::{FallbackKind, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
