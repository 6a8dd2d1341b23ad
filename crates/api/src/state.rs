use std::sync::Arc;

use pipesense_db::repositories::{HealthProbe, SensorRepo, UserRepo, VibrationRepo, WarningRepo};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub sensors: Arc<dyn SensorRepo>,
    pub users: Arc<dyn UserRepo>,
    pub vibrations: Arc<dyn VibrationRepo>,
    pub warnings: Arc<dyn WarningRepo>,
    /// Liveness probe for the backing store.
    pub health: Arc<dyn HealthProbe>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Build state where one store backs every repository.
    pub fn new<S>(store: Arc<S>, config: ServerConfig) -> Self
    where
        S: SensorRepo + UserRepo + VibrationRepo + WarningRepo + HealthProbe + 'static,
    {
        Self {
            sensors: store.clone(),
            users: store.clone(),
            vibrations: store.clone(),
            warnings: store.clone(),
            health: store,
            config: Arc::new(config),
        }
    }
}
