//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno: servidor, capacidad
//! del parking, cadencia de acumulación, snapshot y tarifario.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::config::rates::parse_rate_schedule;
use crate::models::RateSchedule;
use crate::utils::errors::ConfigError;

const DEFAULT_CAPACITY: usize = 100;
const DEFAULT_ACCRUAL_SECS: u64 = 1;
const DEFAULT_SNAPSHOT_PATH: &str = "parked_cars.txt";
const DEFAULT_RATES: &str = "Parking=1";

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub capacity: usize,
    pub accrual_interval: Duration,
    pub snapshot_path: PathBuf,
    pub rates: RateSchedule,
    pub cors_origins: Vec<String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            capacity: DEFAULT_CAPACITY,
            accrual_interval: Duration::from_secs(DEFAULT_ACCRUAL_SECS),
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            rates: RateSchedule::default(),
            cors_origins: Vec::new(),
        }
    }
}

impl EnvironmentConfig {
    /// Cargar la configuración desde las variables de entorno del proceso
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Cargar la configuración desde una función de búsqueda de claves
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let capacity: usize = parse_or("PARKING_CAPACITY", &lookup, defaults.capacity)?;
        if capacity == 0 {
            return Err(invalid("PARKING_CAPACITY", "0", "must be at least 1"));
        }

        let accrual_secs: u64 = parse_or("ACCRUAL_INTERVAL_SECS", &lookup, DEFAULT_ACCRUAL_SECS)?;
        if accrual_secs == 0 {
            return Err(invalid("ACCRUAL_INTERVAL_SECS", "0", "must be at least 1"));
        }

        let rates = match lookup("PARKING_RATES") {
            Some(raw) => parse_rate_schedule(&raw)?,
            None => parse_rate_schedule(DEFAULT_RATES)?,
        };

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", &lookup, defaults.port)?,
            capacity,
            accrual_interval: Duration::from_secs(accrual_secs),
            snapshot_path: lookup("SNAPSHOT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.snapshot_path),
            rates,
            cors_origins,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T, F>(key: &'static str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| invalid(key, &raw, &e.to_string())),
        None => Ok(default),
    }
}

fn invalid(key: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = EnvironmentConfig::from_lookup(|_| None).unwrap();

        assert_eq!(config.capacity, 100);
        assert_eq!(config.accrual_interval, Duration::from_secs(1));
        assert_eq!(config.snapshot_path, PathBuf::from("parked_cars.txt"));
        assert_eq!(config.rates.billing_rate(), Decimal::ONE);
        assert_eq!(config.server_url(), "0.0.0.0:3000");
        assert!(config.is_development());
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_values_are_read_from_lookup() {
        let config = EnvironmentConfig::from_lookup(lookup_from(&[
            ("ENVIRONMENT", "production"),
            ("PORT", "8080"),
            ("PARKING_CAPACITY", "2"),
            ("ACCRUAL_INTERVAL_SECS", "5"),
            ("SNAPSHOT_PATH", "/var/lib/parking/cars.txt"),
            ("PARKING_RATES", "Parking=0.5;Valet=2"),
            ("CORS_ORIGINS", "http://a.test, http://b.test"),
        ]))
        .unwrap();

        assert!(config.is_production());
        assert_eq!(config.port, 8080);
        assert_eq!(config.capacity, 2);
        assert_eq!(config.accrual_interval, Duration::from_secs(5));
        assert_eq!(config.rates.entries().len(), 2);
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let err = EnvironmentConfig::from_lookup(lookup_from(&[("PARKING_CAPACITY", "many")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PARKING_CAPACITY", .. }));

        let err = EnvironmentConfig::from_lookup(lookup_from(&[("PARKING_CAPACITY", "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PARKING_CAPACITY", .. }));

        let err = EnvironmentConfig::from_lookup(lookup_from(&[("ACCRUAL_INTERVAL_SECS", "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "ACCRUAL_INTERVAL_SECS", .. }));

        let err = EnvironmentConfig::from_lookup(lookup_from(&[("PARKING_RATES", "Parking=-3")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRates(_)));
    }
}
