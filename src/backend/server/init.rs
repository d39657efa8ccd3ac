/**
 * Server Initialization
 *
 * 1. Open the document store (Postgres, or memory as a fallback)
 * 2. Build `AppState`
 * 3. Start the periodic board-lock pruning task
 * 4. Create the router
 */

use std::sync::Arc;
use std::time::Duration;

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_store;
use crate::backend::server::state::AppState;
use crate::backend::store::DocumentStore;
use crate::shared::AppConfig;

const LOCK_PRUNE_INTERVAL: Duration = Duration::from_secs(300);

/// Create the application for a validated configuration
pub async fn create_app(config: AppConfig) -> Router<()> {
    tracing::info!("Initializing kanban backend server");

    let store = load_store(&config).await;
    tracing::info!("Using {} store", store.kind());

    let app_state = AppState::new(config, store);

    let locks = app_state.locks.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(LOCK_PRUNE_INTERVAL);
        loop {
            interval.tick().await;
            let pruned = locks.prune();
            tracing::debug!("Pruned {} idle board locks", pruned);
        }
    });

    create_router(app_state)
}

/// Create the application on an existing store, without background tasks
pub fn create_app_with_store(config: AppConfig, store: Arc<dyn DocumentStore>) -> Router<()> {
    create_router(AppState::new(config, store))
}
