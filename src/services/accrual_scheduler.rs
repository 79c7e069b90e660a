//! Planificador de acumulación
//!
//! Tarea en segundo plano que, a cadencia fija, bloquea el ledger para
//! escritura y acumula la tarifa de todas las sesiones activas.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::services::ledger::SharedLedger;

/// Cadencia por defecto: un segundo
pub const DEFAULT_ACCRUAL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Clone)]
pub struct AccrualScheduler {
    ledger: SharedLedger,
    period: Duration,
}

impl AccrualScheduler {
    pub fn new(ledger: SharedLedger, period: Duration) -> Self {
        Self { ledger, period }
    }

    /// Un barrido completo con la hora actual
    pub async fn tick(&self) -> usize {
        let mut ledger = self.ledger.write().await;
        ledger.accrue_all(Utc::now())
    }

    /// Lanzar el barrido periódico hasta que `shutdown` pase a `true`
    pub fn spawn(self, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            info!("⏱️ Acumulación de tarifas cada {:?}", self.period);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let swept = self.tick().await;
                        debug!("⏱️ Barrido completado: {} sesiones", swept);
                    }
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            break;
                        }
                    }
                }
            }

            info!("🛑 Acumulación de tarifas detenida");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RateSchedule;
    use crate::services::ledger::OccupancyLedger;
    use crate::snapshot::NoopSnapshotWriter;
    use rust_decimal::Decimal;
    use std::sync::Arc;

    fn shared_ledger() -> SharedLedger {
        OccupancyLedger::new(5, &RateSchedule::default(), Arc::new(NoopSnapshotWriter)).into_shared()
    }

    #[tokio::test]
    async fn test_tick_advances_every_session() {
        let ledger = shared_ledger();
        let entry = Utc::now() - chrono::Duration::seconds(30);
        {
            let mut guard = ledger.write().await;
            guard.admit("A", entry).unwrap();
            guard.admit("B", entry).unwrap();
        }

        let scheduler = AccrualScheduler::new(ledger.clone(), DEFAULT_ACCRUAL_INTERVAL);
        assert_eq!(scheduler.tick().await, 2);

        let guard = ledger.read().await;
        for session in guard.list() {
            assert!(session.accrued_fee() >= Decimal::new(30, 0));
            assert!(session.last_accrual_instant() > entry);
        }
    }

    #[tokio::test]
    async fn test_spawned_scheduler_accrues_and_stops() {
        let ledger = shared_ledger();
        ledger.write().await.admit("X", Utc::now()).unwrap();

        let (tx, rx) = watch::channel(false);
        let handle = AccrualScheduler::new(ledger.clone(), Duration::from_millis(10)).spawn(rx);

        tokio::time::sleep(Duration::from_millis(80)).await;
        tx.send(true).unwrap();
        handle.await.unwrap();

        let guard = ledger.read().await;
        assert!(guard.find("X").unwrap().accrued_fee() > Decimal::ZERO);
    }
}
