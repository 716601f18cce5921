use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
};
use shared::models::{UsageLog, UsageLogCreate};
use shared::{AppError, AppResult, ErrorCode};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::store::usage_log;

/// POST /api/usage-logs - record a visit for the session's partner
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<UsageLogCreate>,
) -> AppResult<(StatusCode, Json<UsageLog>)> {
    let partner_id = user.partner_id.as_deref().ok_or_else(|| {
        AppError::with_message(ErrorCode::RoleRequired, "Partner session required")
    })?;

    let log = usage_log::create(state.store(), partner_id, payload)?;
    tracing::info!(
        log_id = %log.id,
        member_id = %log.member_id,
        partner_id = %log.partner_id,
        benefit_type = %log.benefit_type,
        "Benefit usage logged"
    );
    Ok((StatusCode::CREATED, Json(log)))
}

/// GET /api/usage-logs - own partner's log; admin sees every partner
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> Json<Vec<UsageLog>> {
    let logs = match user.partner_id.as_deref() {
        Some(partner_id) => usage_log::find_by_partner(state.store(), partner_id),
        None => usage_log::find_all(state.store()),
    };
    Json(logs)
}
