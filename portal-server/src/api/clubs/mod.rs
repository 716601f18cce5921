//! Club administration (admin only)

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::auth::{permissions, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/clubs", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id).delete(handler::delete))
        .route("/{id}/benefits", put(handler::replace_benefits))
        .route("/{id}/registration-link", get(handler::registration_link))
        .layer(middleware::from_fn(require_permission(permissions::ALL)))
}
