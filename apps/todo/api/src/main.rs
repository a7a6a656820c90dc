use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_items::ItemStore;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    // Connects with startup retries and declares the item table
    let store = ItemStore::connect(config.database.clone())
        .await
        .map_err(|e| eyre::eyre!("Item store connection failed: {}", e))?;

    let state = AppState { config, store };

    let api_routes = api::routes(&state);

    // create_router mounts the routes under API_BASE_PATH and adds docs/middleware
    let router =
        axum_helpers::create_router::<openapi::ApiDoc>(api_routes, &state.config.server.base_path)
            .await?;

    // - /health: liveness with app name/version
    // - /ready: readiness with a live database check
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));

    let server_config = state.config.server.clone();
    info!(
        base_path = %server_config.base_path,
        "Starting todo API with graceful shutdown (30s timeout)"
    );

    create_production_app(app, &server_config, Duration::from_secs(30), async move {
        info!("Shutting down: closing item store");
        match state.store.disconnect().await {
            Ok(()) => info!("Item store closed successfully"),
            Err(e) => tracing::error!("Error closing item store: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Todo API shutdown complete");
    Ok(())
}
