use axum::{Extension, Json, extract::State};
use shared::models::{DashboardStats, InsightResponse};
use shared::{AppError, AppResult, ErrorCode};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::store::{club, dashboard};

/// GET /api/dashboard
pub async fn stats(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<DashboardStats>> {
    if !user.role.is_staff() {
        return Err(AppError::new(ErrorCode::RoleRequired));
    }
    Ok(Json(dashboard::stats(state.store())))
}

/// POST /api/dashboard/insight - AI executive summary
///
/// Answers 409 while another summary is still being generated.
pub async fn insight(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<InsightResponse>> {
    let stats = dashboard::stats(state.store());
    let club_names: Vec<String> = club::find_all(state.store())
        .into_iter()
        .map(|c| c.name)
        .collect();

    tracing::info!(role = user.role.as_str(), "Generating executive summary");
    let summary = state.insight.executive_summary(&stats, &club_names).await?;
    Ok(Json(InsightResponse { summary }))
}
