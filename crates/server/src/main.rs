//! Aisle Server - HTTP REST API for basket recommendations
//!
//! This binary serves the recommendation engine over REST: it loads the
//! precomputed artifact bundle at startup and answers basket queries until
//! shut down.

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up a local .env before reading the environment
    dotenvy::dotenv().ok();

    // Load configuration
    let config = ServerConfig::load()?;

    // Start server
    server::start_server(config).await?;

    Ok(())
}
