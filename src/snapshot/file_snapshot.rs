//! Snapshot en fichero de texto
//!
//! Este módulo escribe un fichero legible con un bloque por vehículo
//! aparcado. Es un registro de auditoría, no se vuelve a leer.

use std::fmt::Write as _;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::models::Session;
use crate::utils::errors::SnapshotError;

use super::SnapshotStore;

/// Línea separadora entre bloques
pub const BLOCK_DELIMITER: &str = "====================";

#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Generar el contenido del snapshot
    pub fn render(sessions: &[Session]) -> String {
        let mut out = String::new();
        for session in sessions {
            let entry_nanos = session.entry_instant().timestamp_nanos_opt().unwrap_or_default();
            let _ = writeln!(out, "Identifier: {}", session.identifier());
            let _ = writeln!(out, "Entry time: {}", entry_nanos);
            let _ = writeln!(out, "Accrued fee: {}", session.accrued_fee().normalize());
            let _ = writeln!(out, "{}", BLOCK_DELIMITER);
        }
        out
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn store(&self, sessions: &[Session]) -> Result<(), SnapshotError> {
        tokio::fs::write(&self.path, Self::render(sessions)).await?;
        log::debug!(
            "💾 Snapshot escrito en {} ({} vehículos)",
            self.path.display(),
            sessions.len()
        );
        Ok(())
    }
}
