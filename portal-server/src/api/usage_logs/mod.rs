//! Usage log routes (partner staff)

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::{permissions, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let log_routes = Router::new()
        .route("/api/usage-logs", post(handler::create))
        .layer(middleware::from_fn(require_permission(permissions::USAGE_LOG)));

    let view_routes = Router::new()
        .route("/api/usage-logs", get(handler::list))
        .layer(middleware::from_fn(require_permission(permissions::USAGE_VIEW)));

    log_routes.merge(view_routes)
}
