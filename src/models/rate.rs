//! Modelo de tarifas
//!
//! Este módulo contiene el tarifario (rate schedule): una lista ordenada de
//! servicios con su coste por segundo. Solo la primera entrada factura.

use rust_decimal::Decimal;

use crate::utils::errors::ConfigError;

/// Coste máximo por segundo aceptado en el tarifario
pub const MAX_COST_PER_SECOND: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Servicio del tarifario con su coste por segundo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateEntry {
    pub service: String,
    pub cost_per_second: Decimal,
}

impl RateEntry {
    pub fn new(service: impl Into<String>, cost_per_second: Decimal) -> Self {
        Self {
            service: service.into(),
            cost_per_second,
        }
    }
}

/// Tarifario ordenado, con al menos una entrada y costes entre cero y
/// `MAX_COST_PER_SECOND`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateSchedule {
    entries: Vec<RateEntry>,
}

impl RateSchedule {
    pub fn new(entries: Vec<RateEntry>) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::InvalidRates(
                "at least one rate entry is required".to_string(),
            ));
        }

        if let Some(entry) = entries.iter().find(|e| e.cost_per_second < Decimal::ZERO) {
            return Err(ConfigError::InvalidRates(format!(
                "cost for '{}' must not be negative",
                entry.service
            )));
        }

        if let Some(entry) = entries.iter().find(|e| e.cost_per_second > MAX_COST_PER_SECOND) {
            return Err(ConfigError::InvalidRates(format!(
                "cost for '{}' exceeds {} per second",
                entry.service, MAX_COST_PER_SECOND
            )));
        }

        if let Some(entry) = entries.iter().find(|e| e.service.trim().is_empty()) {
            return Err(ConfigError::InvalidRates(format!(
                "service name must not be empty (cost {})",
                entry.cost_per_second
            )));
        }

        Ok(Self { entries })
    }

    /// Entrada de facturación: la primera del tarifario
    pub fn primary(&self) -> &RateEntry {
        &self.entries[0]
    }

    /// Coste por segundo aplicado a todas las sesiones
    pub fn billing_rate(&self) -> Decimal {
        self.primary().cost_per_second
    }

    pub fn entries(&self) -> &[RateEntry] {
        &self.entries
    }
}

impl Default for RateSchedule {
    fn default() -> Self {
        Self {
            entries: vec![RateEntry::new("Parking", Decimal::ONE)],
        }
    }
}
