//! Modelo de Session
//!
//! Este módulo contiene el identificador de vehículo y la sesión de
//! ocupación activa que guarda el ledger.

use std::borrow::Borrow;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::utils::errors::LedgerError;
use crate::utils::validation::validate_vehicle_identifier;

/// Identificador de vehículo (matrícula), opaco y sensible a mayúsculas
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(String);

impl VehicleId {
    /// Crear un identificador validado
    pub fn parse(raw: &str) -> Result<Self, LedgerError> {
        validate_vehicle_identifier(raw).map_err(|_| LedgerError::InvalidIdentifier)?;
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for VehicleId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for VehicleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ocupación activa de un vehículo
///
/// `last_accrual_instant` nunca retrocede y `accrued_fee` refleja exactamente
/// el tiempo transcurrido entre la entrada y `last_accrual_instant`. Solo el
/// motor de tarifas modifica estos dos campos.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub(crate) identifier: VehicleId,
    pub(crate) entry_instant: DateTime<Utc>,
    pub(crate) last_accrual_instant: DateTime<Utc>,
    pub(crate) accrued_fee: Decimal,
}

impl Session {
    /// Nueva sesión admitida en `now`, sin tarifa acumulada
    pub fn new(identifier: VehicleId, now: DateTime<Utc>) -> Self {
        Self {
            identifier,
            entry_instant: now,
            last_accrual_instant: now,
            accrued_fee: Decimal::ZERO,
        }
    }

    pub fn identifier(&self) -> &VehicleId {
        &self.identifier
    }

    pub fn entry_instant(&self) -> DateTime<Utc> {
        self.entry_instant
    }

    pub fn last_accrual_instant(&self) -> DateTime<Utc> {
        self.last_accrual_instant
    }

    pub fn accrued_fee(&self) -> Decimal {
        self.accrued_fee
    }
}
