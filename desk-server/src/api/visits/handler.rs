//! Visit API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{ActiveVisit, SeatOutcome, VisitCreate};

use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult};

/// POST /api/visits - seat a client
///
/// `venue_full` and `table_occupied` are regular outcomes, not errors.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<VisitCreate>,
) -> AppResult<ApiResponse<SeatOutcome>> {
    let outcome = state.front_desk.seat_visit(payload)?;
    Ok(ApiResponse::success(outcome))
}

/// GET /api/visits/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<ActiveVisit>> {
    Ok(ApiResponse::success(state.front_desk.visit(&id)?))
}

/// POST /api/visits/{id}/finish
pub async fn finish(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<ActiveVisit>> {
    Ok(ApiResponse::success(state.front_desk.finalize_visit(&id)?))
}
