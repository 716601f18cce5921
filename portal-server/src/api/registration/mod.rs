//! Public registration routes
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/registration/clubs | GET | clubs open for sign-up |
//! | /api/registration/clubs/{club_id} | GET | one club (registration link target) |
//! | /api/registrations | POST | apply for club membership |
//! | /api/registration/programs/{partner_id}/{program_id} | GET | program behind a link |
//! | /api/registration/programs/{partner_id}/{program_id}/enrollments | POST | join a program |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/registration/clubs", get(handler::list_clubs))
        .route("/api/registration/clubs/{club_id}", get(handler::get_club))
        .route("/api/registrations", post(handler::register_member))
        .route(
            "/api/registration/programs/{partner_id}/{program_id}",
            get(handler::program_context),
        )
        .route(
            "/api/registration/programs/{partner_id}/{program_id}/enrollments",
            post(handler::enroll),
        )
}
