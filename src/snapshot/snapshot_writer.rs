//! Puertos de snapshot
//!
//! `SnapshotWriter` es el hook síncrono que el ledger llama con la lista
//! completa de sesiones tras cada mutación, con el bloqueo tomado: nunca
//! debe hacer E/S. `SnapshotStore` es el destino asíncrono que escribe de
//! verdad, fuera del bloqueo.

use async_trait::async_trait;

use crate::models::Session;
use crate::utils::errors::SnapshotError;

pub trait SnapshotWriter: Send + Sync {
    /// Entregar las sesiones actuales; no bloquea
    fn write(&self, sessions: &[Session]) -> Result<(), SnapshotError>;
}

#[async_trait]
pub trait SnapshotStore: Send + Sync + 'static {
    /// Sobrescribir el destino con las sesiones
    async fn store(&self, sessions: &[Session]) -> Result<(), SnapshotError>;
}

/// Escritor que descarta los snapshots (persistencia deshabilitada)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSnapshotWriter;

impl SnapshotWriter for NoopSnapshotWriter {
    fn write(&self, _sessions: &[Session]) -> Result<(), SnapshotError> {
        Ok(())
    }
}
