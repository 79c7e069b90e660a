//! Configuración del tarifario
//!
//! Formato: pares `servicio=coste` separados por `;`, en orden. El primer
//! servicio es el que factura, p. ej. `Parking=1;Car wash=0.5`.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::models::{RateEntry, RateSchedule};
use crate::utils::errors::ConfigError;

pub fn parse_rate_schedule(raw: &str) -> Result<RateSchedule, ConfigError> {
    let mut entries = Vec::new();

    for segment in raw.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        let (service, cost) = segment.split_once('=').ok_or_else(|| {
            ConfigError::InvalidRates(format!("expected 'service=cost', got '{}'", segment))
        })?;

        let service = service.trim();
        let cost = Decimal::from_str(cost.trim()).map_err(|e| {
            ConfigError::InvalidRates(format!("invalid cost for '{}': {}", service, e))
        })?;

        entries.push(RateEntry::new(service, cost));
    }

    RateSchedule::new(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_order() {
        let schedule = parse_rate_schedule("Parking=0.05; Car wash = 2 ;").unwrap();

        let names: Vec<&str> = schedule.entries().iter().map(|e| e.service.as_str()).collect();
        assert_eq!(names, vec!["Parking", "Car wash"]);
        assert_eq!(schedule.billing_rate(), Decimal::new(5, 2));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse_rate_schedule("").is_err());
        assert!(parse_rate_schedule("Parking").is_err());
        assert!(parse_rate_schedule("Parking=abc").is_err());
        assert!(parse_rate_schedule("Parking=-1").is_err());
        assert!(parse_rate_schedule("=1").is_err());
    }
}
