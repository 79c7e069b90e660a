//! Snapshot
//!
//! Este módulo contiene el puerto de persistencia que el ledger invoca
//! después de cada cambio, el publicador que lo desacopla de la E/S y los
//! destinos donde se escribe.

pub mod file_snapshot;
pub mod publisher;
pub mod snapshot_writer;

pub use file_snapshot::FileSnapshotStore;
pub use publisher::SnapshotPublisher;
pub use snapshot_writer::{NoopSnapshotWriter, SnapshotStore, SnapshotWriter};
