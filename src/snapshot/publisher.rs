//! Publicador de snapshots
//!
//! Implementa el hook del ledger sin hacer E/S: deja la última lista de
//! sesiones en un canal `watch` y una tarea en segundo plano la escribe en
//! el `SnapshotStore`. Si llegan varios cambios mientras se escribe, solo se
//! escribe el más reciente (cada snapshot sobrescribe el anterior).

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::models::Session;
use crate::utils::errors::SnapshotError;

use super::{SnapshotStore, SnapshotWriter};

type Pending = Option<Arc<Vec<Session>>>;

pub struct SnapshotPublisher {
    tx: watch::Sender<Pending>,
}

impl SnapshotPublisher {
    /// Lanzar la tarea de escritura
    ///
    /// La tarea termina cuando se suelta el publicador, después de escribir
    /// el último snapshot pendiente.
    pub fn spawn<S: SnapshotStore>(store: S) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = watch::channel::<Pending>(None);

        let worker = tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let latest = rx.borrow_and_update().clone();
                if let Some(sessions) = latest {
                    if let Err(e) = store.store(&sessions).await {
                        log::warn!("⚠️ Error escribiendo snapshot: {}", e);
                    }
                }
            }
            log::info!("💾 Escritura de snapshots detenida");
        });

        (Self { tx }, worker)
    }
}

impl SnapshotWriter for SnapshotPublisher {
    fn write(&self, sessions: &[Session]) -> Result<(), SnapshotError> {
        self.tx
            .send(Some(Arc::new(sessions.to_vec())))
            .map_err(|_| SnapshotError::WorkerStopped)
    }
}
