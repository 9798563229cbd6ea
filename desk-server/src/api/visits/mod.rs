//! Visit API
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/visits | POST | seat a client |
//! | /api/visits/{id} | GET | fetch visit |
//! | /api/visits/{id}/finish | POST | finish visit, release table |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/visits", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/finish", post(handler::finish))
}
