//! Membership verification
//!
//! `GET /api/verify?q=<ic or member id>&select=<member id>` is public. A
//! partner session additionally learns whether it may log a visit.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/verify", get(handler::verify))
}
