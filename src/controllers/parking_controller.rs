use chrono::Utc;
use validator::Validate;

use crate::dto::parking_dto::{
    AdmitVehicleRequest, ApiResponse, RateResponse, RateScheduleResponse, ReleaseResponse,
    SessionResponse, SpacesResponse,
};
use crate::state::AppState;
use crate::utils::errors::{AppResult, LedgerError};

/// Casos de uso del operador sobre el ledger compartido
pub struct ParkingController {
    state: AppState,
}

impl ParkingController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn admit(
        &self,
        request: AdmitVehicleRequest,
    ) -> AppResult<ApiResponse<SessionResponse>> {
        request.validate()?;

        let now = Utc::now();
        let mut ledger = self.state.ledger.write().await;
        let session = ledger.admit(&request.identifier, now)?;
        let current_fee = ledger.fee_engine().preview(&session, now);

        Ok(ApiResponse::success_with_message(
            SessionResponse::from_session(&session, current_fee),
            "Vehicle parked".to_string(),
        ))
    }

    pub async fn get(&self, identifier: &str) -> AppResult<SessionResponse> {
        let now = Utc::now();
        let ledger = self.state.ledger.read().await;
        let session = ledger
            .find(identifier)
            .ok_or_else(|| LedgerError::UnknownIdentifier(identifier.to_string()))?;

        Ok(SessionResponse::from_session(
            session,
            ledger.fee_engine().preview(session, now),
        ))
    }

    pub async fn list(&self) -> Vec<SessionResponse> {
        let now = Utc::now();
        let ledger = self.state.ledger.read().await;
        let engine = *ledger.fee_engine();

        ledger
            .list()
            .map(|session| SessionResponse::from_session(session, engine.preview(session, now)))
            .collect()
    }

    pub async fn release(
        &self,
        identifier: &str,
    ) -> AppResult<ApiResponse<ReleaseResponse>> {
        let settlement = self
            .state
            .ledger
            .write()
            .await
            .release(identifier, Utc::now())?;

        let message = format!("Fee to pay: {}", settlement.fee);
        Ok(ApiResponse::success_with_message(settlement.into(), message))
    }

    pub async fn spaces(&self) -> SpacesResponse {
        let ledger = self.state.ledger.read().await;
        SpacesResponse {
            capacity: ledger.capacity(),
            occupied: ledger.len(),
            available: ledger.available_spaces(),
        }
    }

    pub fn rates(&self) -> RateScheduleResponse {
        let rates = &self.state.config.rates;
        RateScheduleResponse {
            billing_service: rates.primary().service.clone(),
            rates: rates.entries().iter().map(RateResponse::from).collect(),
        }
    }
}
