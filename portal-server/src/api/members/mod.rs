//! Member API
//!
//! AJK sessions only ever see and change members of their own club.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::auth::{permissions, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/members", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/ecard", get(handler::download_ecard))
        .route("/{id}/share", get(handler::share))
        .layer(middleware::from_fn(require_permission(permissions::MEMBERS_VIEW)));

    let approve_routes = Router::new()
        .route("/{id}/status", put(handler::update_status))
        .layer(middleware::from_fn(require_permission(permissions::MEMBERS_APPROVE)));

    read_routes.merge(approve_routes)
}
