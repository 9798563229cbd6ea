//! Waiting List API
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/waitlist | GET | entries in arrival order (`?venue_id=&status=`) |
//! | /api/waitlist | POST | add entry |
//! | /api/waitlist/{id} | GET | fetch entry |
//! | /api/waitlist/{id}/promote | POST | seat a waiting client |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/waitlist", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/promote", post(handler::promote))
}
