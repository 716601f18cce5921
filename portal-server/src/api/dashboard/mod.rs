//! Dashboard routes
//!
//! | Path | Method | Access |
//! |------|--------|--------|
//! | /api/dashboard | GET | any staff session |
//! | /api/dashboard/insight | POST | reports:view |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::{permissions, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let insight = Router::new()
        .route("/api/dashboard/insight", post(handler::insight))
        .layer(middleware::from_fn(require_permission(permissions::REPORTS_VIEW)));

    Router::new()
        .route("/api/dashboard", get(handler::stats))
        .merge(insight)
}
