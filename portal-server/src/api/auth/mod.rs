//! Session Routes

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

/// - /api/auth/session: public
/// - /api/auth/me: session required (global require_auth)
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/auth/session", post(handler::open_session))
        .route("/api/auth/me", get(handler::me))
}
