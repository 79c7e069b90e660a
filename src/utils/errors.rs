//! Sistema de manejo de errores
//!
//! Este módulo define los errores del ledger de ocupación, de la
//! configuración y del snapshot, y su conversión a respuestas HTTP.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Errores de las operaciones del ledger
///
/// Todos son recuperables: se reportan al operador y el ledger queda intacto.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Vehicle identifier must not be empty")]
    InvalidIdentifier,

    #[error("Vehicle '{0}' is already parked")]
    DuplicateIdentifier(String),

    #[error("Parking is full (capacity {capacity})")]
    CapacityExceeded { capacity: usize },

    #[error("Vehicle '{0}' is not parked")]
    UnknownIdentifier(String),
}

/// Errores del escritor de snapshots
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot worker stopped")]
    WorkerStopped,
}

/// Errores de configuración detectados al arrancar
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid rate schedule: {0}")]
    InvalidRates(String),
}

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    code: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, error, code) = match &self {
            AppError::Ledger(LedgerError::DuplicateIdentifier(_)) => {
                (StatusCode::CONFLICT, "Conflict", "DUPLICATE_IDENTIFIER")
            }
            AppError::Ledger(LedgerError::CapacityExceeded { .. }) => {
                (StatusCode::CONFLICT, "Conflict", "CAPACITY_EXCEEDED")
            }
            AppError::Ledger(LedgerError::UnknownIdentifier(_)) => {
                (StatusCode::NOT_FOUND, "Not Found", "UNKNOWN_IDENTIFIER")
            }
            AppError::Ledger(LedgerError::InvalidIdentifier) | AppError::Validation(_) => {
                (StatusCode::BAD_REQUEST, "Validation Error", "VALIDATION_ERROR")
            }
        };

        tracing::warn!("⚠️ {} ({})", message, code);

        let body = ErrorResponse {
            error: error.to_string(),
            message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;
