//! Partner administration (admin only)
//!
//! | Path | Method |
//! |------|--------|
//! | /api/partners | GET, POST |
//! | /api/partners/{id} | GET, PUT |
//! | /api/partners/{id}/programs | POST |
//! | /api/partners/{id}/programs/{program_id} | PUT, DELETE |
//! | /api/partners/{id}/programs/{program_id}/registration-link | GET |
//! | /api/partners/{id}/enrollments | GET, POST |
//! | /api/partners/{id}/enrollments/{enrollment_id}/status | PUT |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::{permissions, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/partners", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id).put(handler::update))
        .route("/{id}/programs", post(handler::add_program))
        .route(
            "/{id}/programs/{program_id}",
            put(handler::update_program).delete(handler::delete_program),
        )
        .route(
            "/{id}/programs/{program_id}/registration-link",
            get(handler::program_link),
        )
        .route(
            "/{id}/enrollments",
            get(handler::list_enrollments).post(handler::add_enrollment),
        )
        .route(
            "/{id}/enrollments/{enrollment_id}/status",
            put(handler::update_enrollment_status),
        )
        .layer(middleware::from_fn(require_permission(permissions::ALL)))
}
