//! Freight route planner HTTP server.
//!
//! Configuration comes from `FREIGHT_DATASET`, `FREIGHT_BIND` and
//! `FREIGHT_CACHE_TTL_SECS` (see [`ServerConfig`]); `RUST_LOG` sets the log
//! filter (default: info).

use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use freight_server::config::ServerConfig;
use freight_server::directory::{CachedDirectory, InMemoryDirectory};
use freight_server::planner::SearchConfig;
use freight_server::web::{AppState, create_router};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = ServerConfig::from_env()?;
    info!(dataset = %config.dataset_path.display(), "loading node dataset");

    let directory = InMemoryDirectory::load(&config.dataset_path).map_err(|e| {
        error!(error = %e, path = %config.dataset_path.display(), "failed to load dataset");
        e
    })?;
    info!(nodes = directory.len(), "dataset loaded");

    let cached = CachedDirectory::new(directory, &config.cache);
    let state = AppState::new(cached, SearchConfig::default());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(addr = %config.bind, "freight route planner listening");
    info!("  GET  /health             - Health check");
    info!("  GET  /api/cities/search  - Search cities");
    info!("  GET  /api/nodes/nearest  - Nearest ports and airports");
    info!("  POST /api/routes/plan    - Plan routes");

    axum::serve(listener, app).await?;
    Ok(())
}
