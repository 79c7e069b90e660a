//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::services::ledger::{OccupancyLedger, SharedLedger};
use crate::snapshot::SnapshotWriter;

#[derive(Clone)]
pub struct AppState {
    pub ledger: SharedLedger,
    pub config: Arc<EnvironmentConfig>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, snapshot: Arc<dyn SnapshotWriter>) -> Self {
        let ledger = OccupancyLedger::new(config.capacity, &config.rates, snapshot).into_shared();
        Self {
            ledger,
            config: Arc::new(config),
        }
    }
}
