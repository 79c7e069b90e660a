use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::controllers::parking_controller::ParkingController;
use crate::dto::parking_dto::{
    AdmitVehicleRequest, ApiResponse, RateScheduleResponse, ReleaseResponse, SessionResponse,
    SpacesResponse,
};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_parking_router() -> Router<AppState> {
    Router::new()
        .route("/sessions", get(list_sessions).post(admit_vehicle))
        .route("/sessions/:identifier", get(get_session).delete(release_vehicle))
        .route("/spaces", get(get_spaces))
        .route("/rates", get(get_rates))
}

async fn admit_vehicle(
    State(state): State<AppState>,
    Json(request): Json<AdmitVehicleRequest>,
) -> AppResult<Json<ApiResponse<SessionResponse>>> {
    let controller = ParkingController::new(state);
    let response = controller.admit(request).await?;
    Ok(Json(response))
}

async fn list_sessions(State(state): State<AppState>) -> Json<Vec<SessionResponse>> {
    let controller = ParkingController::new(state);
    Json(controller.list().await)
}

async fn get_session(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> AppResult<Json<SessionResponse>> {
    let controller = ParkingController::new(state);
    let response = controller.get(&identifier).await?;
    Ok(Json(response))
}

async fn release_vehicle(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> AppResult<Json<ApiResponse<ReleaseResponse>>> {
    let controller = ParkingController::new(state);
    let response = controller.release(&identifier).await?;
    Ok(Json(response))
}

async fn get_spaces(State(state): State<AppState>) -> Json<SpacesResponse> {
    let controller = ParkingController::new(state);
    Json(controller.spaces().await)
}

async fn get_rates(State(state): State<AppState>) -> Json<RateScheduleResponse> {
    let controller = ParkingController::new(state);
    Json(controller.rates())
}
