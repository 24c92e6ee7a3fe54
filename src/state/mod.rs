/// Race session model and per-session mutations.
pub mod session;
/// Registry of live sessions with per-code serialized access.
pub mod store;

use std::sync::Arc;

use self::store::SessionStore;
use crate::{config::AppConfig, dao::embedding::Embedder, error::ServiceError};

/// Cheaply cloneable handle to the application state.
pub type SharedState = Arc<AppState>;

/// Central application state: the session registry, the optional embedding
/// backend and the loaded configuration.
pub struct AppState {
    sessions: SessionStore,
    embedder: Option<Arc<dyn Embedder>>,
    config: AppConfig,
}

impl AppState {
    /// Construct the state wrapped in an [`Arc`] so handlers can clone it.
    ///
    /// Without an embedder the application runs in degraded mode: sessions
    /// work, hint ranking answers 503.
    pub fn new(config: AppConfig, embedder: Option<Arc<dyn Embedder>>) -> SharedState {
        Arc::new(Self {
            sessions: SessionStore::new(),
            embedder,
            config,
        })
    }

    /// Registry of live race sessions.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Handle to the embedding backend, if one is configured.
    pub fn embedder(&self) -> Option<Arc<dyn Embedder>> {
        self.embedder.clone()
    }

    /// Embedding backend or the degraded-mode failure.
    pub fn require_embedder(&self) -> Result<Arc<dyn Embedder>, ServiceError> {
        self.embedder.clone().ok_or(ServiceError::Degraded)
    }

    /// Whether hint ranking is available.
    pub fn hints_enabled(&self) -> bool {
        self.embedder.is_some()
    }

    /// Loaded application configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
