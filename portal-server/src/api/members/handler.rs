//! Member API Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use shared::models::{MemberStatus, MemberStatusUpdate, MemberWithClub};
use shared::{AppError, AppResult, ErrorCode};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::ecard::{self, EcardView, ShareLinks};
use crate::store::member;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub club_id: Option<String>,
    #[serde(default)]
    pub status: Option<MemberStatus>,
}

fn scope_violation(club_id: &str) -> AppError {
    AppError::new(ErrorCode::ClubScopeViolation).with_detail("club_id", club_id)
}

/// Load a member the session is allowed to see
fn load_visible(state: &ServerState, user: &CurrentUser, id: &str) -> AppResult<MemberWithClub> {
    let found = member::find_by_id(state.store(), id).ok_or_else(|| AppError::member_not_found(id))?;
    if !user.can_access_club(&found.member.club_id) {
        crate::security_log!(
            "WARN",
            "club_scope_violation",
            session_id = user.session_id.as_str(),
            member_id = id
        );
        return Err(scope_violation(&found.member.club_id));
    }
    Ok(found)
}

/// GET /api/members?q=&club_id=&status=
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<MemberWithClub>>> {
    let club_id = match (user.club_scope()?, query.club_id.as_deref()) {
        (Some(own), Some(asked)) if own != asked => return Err(scope_violation(asked)),
        (Some(own), _) => Some(own),
        (None, asked) => asked,
    };

    let members = member::search(state.store(), query.q.as_deref().unwrap_or_default(), club_id)
        .into_iter()
        .filter(|m| query.status.is_none_or(|s| m.member.status == s))
        .collect();
    Ok(Json(members))
}

/// GET /api/members/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<MemberWithClub>> {
    load_visible(&state, &user, &id).map(Json)
}

/// PUT /api/members/{id}/status - approve, reject or expire
pub async fn update_status(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<MemberStatusUpdate>,
) -> AppResult<Json<MemberWithClub>> {
    load_visible(&state, &user, &id)?;
    let updated = member::update_status(state.store(), &id, payload.status)?;

    tracing::info!(
        member_id = %id,
        status = %updated.member.status,
        role = user.role.as_str(),
        "Member status changed"
    );
    Ok(Json(updated))
}

/// GET /api/members/{id}/ecard - card as a downloadable SVG
pub async fn download_ecard(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let found = load_visible(&state, &user, &id)?;
    let view = ecard::build_view(&found, &state.config.public_base_url)?;
    let svg = ecard::render_svg(&view)?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        ecard::file_name(&found.member.id)
    );
    Ok((
        [
            (header::CONTENT_TYPE, "image/svg+xml; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        svg,
    ))
}

#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub card: EcardView,
    #[serde(flatten)]
    pub links: ShareLinks,
}

/// GET /api/members/{id}/share - card data with WhatsApp / email links
pub async fn share(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<ShareResponse>> {
    let found = load_visible(&state, &user, &id)?;
    let card = ecard::build_view(&found, &state.config.public_base_url)?;
    Ok(Json(ShareResponse {
        card,
        links: ecard::share_links(&found),
    }))
}
