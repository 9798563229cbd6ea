//! Venue API
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/venues | GET | capacity table |
//! | /api/venues/{venue_id}/availability | GET | free / occupied tables (`?floor=`) |
//! | /api/venues/{venue_id}/visits | GET | active visits |
//! | /api/venues/{venue_id}/history | GET | all visits, finished included |
//! | /api/venues/{venue_id}/seat-request | POST | advisory seat decision |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/venues", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{venue_id}/availability", get(handler::availability))
        .route("/{venue_id}/visits", get(handler::active_visits))
        .route("/{venue_id}/history", get(handler::history))
        .route("/{venue_id}/seat-request", post(handler::seat_request))
}
