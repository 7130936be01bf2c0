//! Full-state sync API module
//!
//! The mobile client's sync protocol: pull and push the whole state value.
//! Unauthenticated like the original server — the state endpoints are the
//! mobile boundary, the admin token only guards the console routes.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/state", get(handler::get_state).put(handler::put_state))
}
