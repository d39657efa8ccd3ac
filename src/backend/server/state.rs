/**
 * Application State Management
 *
 * `AppState` is the single state container handed to the router. The
 * `FromRef` implementations let handlers extract only the piece they
 * need, e.g. `State(store): State<Arc<dyn DocumentStore>>`.
 *
 * # Thread Safety
 *
 * - `Arc<dyn DocumentStore>` is shared by every request
 * - `BoardLocks` is a cheap clone over one shared registry
 * - `Arc<AppConfig>` is read-only after startup
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::locks::BoardLocks;
use crate::backend::store::DocumentStore;
use crate::shared::AppConfig;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Document store (Postgres or in-memory), created once at startup
    pub store: Arc<dyn DocumentStore>,

    /// Per-board structural mutation locks
    pub locks: BoardLocks,

    /// Validated configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            locks: BoardLocks::new(),
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for Arc<dyn DocumentStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}

impl FromRef<AppState> for BoardLocks {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.locks.clone()
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
