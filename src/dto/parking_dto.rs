use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{RateEntry, Session};
use crate::services::Settlement;
use crate::utils::validation::validate_vehicle_identifier;

// Envoltorio común de respuestas
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}

// Request para aparcar un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct AdmitVehicleRequest {
    #[validate(custom = "validate_vehicle_identifier")]
    pub identifier: String,
}

// Vista de una sesión activa
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub identifier: String,
    pub entry_instant: DateTime<Utc>,
    pub last_accrual_instant: DateTime<Utc>,
    pub accrued_fee: Decimal,
    pub current_fee: Decimal,
}

impl SessionResponse {
    pub fn from_session(session: &Session, current_fee: Decimal) -> Self {
        Self {
            identifier: session.identifier().to_string(),
            entry_instant: session.entry_instant(),
            last_accrual_instant: session.last_accrual_instant(),
            accrued_fee: session.accrued_fee(),
            current_fee,
        }
    }
}

// Response de pago y salida
#[derive(Debug, Serialize)]
pub struct ReleaseResponse {
    pub identifier: String,
    pub entry_instant: DateTime<Utc>,
    pub released_at: DateTime<Utc>,
    pub settled_fee: Decimal,
}

impl From<Settlement> for ReleaseResponse {
    fn from(settlement: Settlement) -> Self {
        Self {
            identifier: settlement.identifier.to_string(),
            entry_instant: settlement.entry_instant,
            released_at: settlement.released_at,
            settled_fee: settlement.fee,
        }
    }
}

// Plazas disponibles
#[derive(Debug, Serialize)]
pub struct SpacesResponse {
    pub capacity: usize,
    pub occupied: usize,
    pub available: usize,
}

// Tarifario: el coste mostrado es el mismo que se factura
#[derive(Debug, Serialize)]
pub struct RateResponse {
    pub service: String,
    pub cost_per_second: Decimal,
}

impl From<&RateEntry> for RateResponse {
    fn from(entry: &RateEntry) -> Self {
        Self {
            service: entry.service.clone(),
            cost_per_second: entry.cost_per_second,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RateScheduleResponse {
    pub billing_service: String,
    pub rates: Vec<RateResponse>,
}
