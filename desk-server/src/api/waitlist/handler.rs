//! Waiting List API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::models::{
    SeatOutcome, VenueId, WaitlistCreate, WaitlistEntry, WaitlistPromote, WaitlistStatus,
};

use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult};

#[derive(Debug, Default, Deserialize)]
pub struct WaitlistQuery {
    pub venue_id: Option<VenueId>,
    pub status: Option<WaitlistStatus>,
}

/// GET /api/waitlist - entries ordered by arrival
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<WaitlistQuery>,
) -> AppResult<ApiResponse<Vec<WaitlistEntry>>> {
    let entries = state
        .front_desk
        .waitlist(query.venue_id.as_ref(), query.status)?;
    Ok(ApiResponse::success(entries))
}

/// POST /api/waitlist - add a client to the waiting list
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<WaitlistCreate>,
) -> AppResult<ApiResponse<WaitlistEntry>> {
    Ok(ApiResponse::success(state.front_desk.join_waitlist(payload)?))
}

/// GET /api/waitlist/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<WaitlistEntry>> {
    Ok(ApiResponse::success(state.front_desk.waitlist_entry(&id)?))
}

/// POST /api/waitlist/{id}/promote - seat a waiting client
///
/// The body is optional; an empty body picks the lowest free table.
pub async fn promote(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Option<Json<WaitlistPromote>>,
) -> AppResult<ApiResponse<SeatOutcome>> {
    let req = payload.map(|Json(p)| p).unwrap_or_default();
    Ok(ApiResponse::success(
        state.front_desk.promote_from_waitlist(&id, req)?,
    ))
}
