//! Ledger de ocupación
//!
//! Fuente única de verdad de los vehículos aparcados. Aplica la unicidad
//! de identificadores y el límite de capacidad, y avisa al escritor de
//! snapshots después de cada cambio.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::models::{RateSchedule, Session, VehicleId};
use crate::services::fee_engine::FeeEngine;
use crate::snapshot::SnapshotWriter;
use crate::utils::errors::LedgerError;

/// Ledger compartido entre handlers y el planificador de acumulación
pub type SharedLedger = Arc<RwLock<OccupancyLedger>>;

/// Resultado de una salida (pago y salida del vehículo)
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub identifier: VehicleId,
    pub entry_instant: DateTime<Utc>,
    pub released_at: DateTime<Utc>,
    pub fee: Decimal,
}

pub struct OccupancyLedger {
    capacity: usize,
    sessions: HashMap<VehicleId, Session>,
    // orden de llegada, para listados deterministas
    arrivals: Vec<VehicleId>,
    fee_engine: FeeEngine,
    snapshot: Arc<dyn SnapshotWriter>,
}

impl OccupancyLedger {
    pub fn new(capacity: usize, rates: &RateSchedule, snapshot: Arc<dyn SnapshotWriter>) -> Self {
        Self {
            capacity,
            sessions: HashMap::new(),
            arrivals: Vec::new(),
            fee_engine: FeeEngine::from_schedule(rates),
            snapshot,
        }
    }

    pub fn into_shared(self) -> SharedLedger {
        Arc::new(RwLock::new(self))
    }

    /// Admitir un vehículo en `now`
    ///
    /// Rechaza (sin reemplazar) identificadores ya presentes y admisiones
    /// con el parking lleno. Un rechazo deja el ledger intacto.
    pub fn admit(&mut self, identifier: &str, now: DateTime<Utc>) -> Result<Session, LedgerError> {
        let identifier = VehicleId::parse(identifier)?;

        if self.sessions.contains_key(&identifier) {
            log::warn!("🚫 Vehículo {} ya está aparcado", identifier);
            return Err(LedgerError::DuplicateIdentifier(identifier.to_string()));
        }

        if self.sessions.len() >= self.capacity {
            log::warn!("🚫 Parking lleno ({}), vehículo {} rechazado", self.capacity, identifier);
            return Err(LedgerError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        let session = Session::new(identifier.clone(), now);
        self.sessions.insert(identifier.clone(), session.clone());
        self.arrivals.push(identifier);

        log::info!(
            "🚗 Vehículo {} aparcado ({}/{})",
            session.identifier(),
            self.sessions.len(),
            self.capacity
        );

        self.persist();
        Ok(session)
    }

    /// Buscar la sesión activa de un vehículo
    pub fn find(&self, identifier: &str) -> Option<&Session> {
        self.sessions.get(identifier)
    }

    /// Liquidar y retirar un vehículo
    pub fn release(&mut self, identifier: &str, now: DateTime<Utc>) -> Result<Settlement, LedgerError> {
        let Some(mut session) = self.sessions.remove(identifier) else {
            log::warn!("🔍 Vehículo {} no encontrado", identifier);
            return Err(LedgerError::UnknownIdentifier(identifier.to_string()));
        };
        self.arrivals.retain(|id| id.as_str() != identifier);

        let fee = self.fee_engine.settle(&mut session, now);

        log::info!("💰 Vehículo {} sale, importe {}", session.identifier(), fee);

        self.persist();
        Ok(Settlement {
            identifier: session.identifier,
            entry_instant: session.entry_instant,
            released_at: now,
            fee,
        })
    }

    /// Acumular la tarifa de todas las sesiones hasta `now`
    ///
    /// Se ejecuta entero bajo el mismo bloqueo que admit/release. Devuelve
    /// el número de sesiones recorridas.
    pub fn accrue_all(&mut self, now: DateTime<Utc>) -> usize {
        let engine = self.fee_engine;
        for session in self.sessions.values_mut() {
            engine.accrue(session, now);
        }

        let swept = self.sessions.len();
        log::debug!("⏱️ Acumulación de tarifas: {} sesiones", swept);

        self.persist();
        swept
    }

    /// Importe actual (sin redondear) de un vehículo, sin modificar nada
    pub fn current_fee(&self, identifier: &str, now: DateTime<Utc>) -> Option<Decimal> {
        self.find(identifier)
            .map(|session| self.fee_engine.preview(session, now))
    }

    /// Sesiones activas en orden de llegada
    ///
    /// Cada llamada devuelve un iterador nuevo sobre el estado actual.
    pub fn list(&self) -> impl Iterator<Item = &Session> + '_ {
        self.arrivals.iter().filter_map(|id| self.sessions.get(id))
    }

    pub fn available_spaces(&self) -> usize {
        self.capacity.saturating_sub(self.sessions.len())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn fee_engine(&self) -> &FeeEngine {
        &self.fee_engine
    }

    /// Enviar el estado actual al escritor de snapshots (best-effort)
    fn persist(&self) {
        let sessions: Vec<Session> = self.list().cloned().collect();
        if let Err(e) = self.snapshot.write(&sessions) {
            log::warn!("⚠️ Error escribiendo snapshot: {}", e);
        }
    }
}
