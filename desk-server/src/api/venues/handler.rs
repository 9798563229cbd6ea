//! Venue API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::models::{ActiveVisit, Availability, Floor, SeatDecision, SeatRequest, VenueId, VenueInfo};

use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult};

#[derive(Debug, Default, Deserialize)]
pub struct FloorQuery {
    pub floor: Option<u8>,
}

/// GET /api/venues - capacity table
pub async fn list(State(state): State<ServerState>) -> AppResult<ApiResponse<Vec<VenueInfo>>> {
    Ok(ApiResponse::success(state.front_desk.venues()))
}

/// GET /api/venues/{venue_id}/availability?floor=
pub async fn availability(
    State(state): State<ServerState>,
    Path(venue_id): Path<String>,
    Query(query): Query<FloorQuery>,
) -> AppResult<ApiResponse<Availability>> {
    let availability = state
        .front_desk
        .availability(&VenueId::new(venue_id), query.floor.map(Floor))?;
    Ok(ApiResponse::success(availability))
}

/// GET /api/venues/{venue_id}/visits - active visits
pub async fn active_visits(
    State(state): State<ServerState>,
    Path(venue_id): Path<String>,
) -> AppResult<ApiResponse<Vec<ActiveVisit>>> {
    let visits = state.front_desk.active_visits(&VenueId::new(venue_id))?;
    Ok(ApiResponse::success(visits))
}

/// GET /api/venues/{venue_id}/history - visits oldest first
pub async fn history(
    State(state): State<ServerState>,
    Path(venue_id): Path<String>,
) -> AppResult<ApiResponse<Vec<ActiveVisit>>> {
    let visits = state.front_desk.visit_history(&VenueId::new(venue_id))?;
    Ok(ApiResponse::success(visits))
}

/// POST /api/venues/{venue_id}/seat-request - advisory, writes nothing
pub async fn seat_request(
    State(state): State<ServerState>,
    Path(venue_id): Path<String>,
    Json(payload): Json<SeatRequest>,
) -> AppResult<ApiResponse<SeatDecision>> {
    let decision = state.front_desk.request_seat(
        &VenueId::new(venue_id),
        payload.floor,
        payload.table_number,
    )?;
    Ok(ApiResponse::success(decision))
}
