//! Club API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use shared::models::{Club, ClubBenefitsUpdate, ClubCreate};
use shared::{AppError, AppResult};

use crate::core::ServerState;
use crate::services::ecard;
use crate::store::{club, member};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_email, validate_list, validate_required_text,
};

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Club with its membership count
#[derive(Debug, Serialize)]
pub struct ClubOverview {
    #[serde(flatten)]
    pub club: Club,
    pub member_count: usize,
}

fn overview(state: &ServerState, club: Club) -> ClubOverview {
    ClubOverview {
        member_count: member::count_by_club(state.store(), &club.id),
        club,
    }
}

fn validate_create(payload: &ClubCreate) -> AppResult<()> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.code, "code", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.pic_name, "pic_name", MAX_NAME_LEN)?;
    validate_required_text(&payload.pic_phone, "pic_phone", MAX_SHORT_TEXT_LEN)?;
    validate_email(&payload.email, "email")?;
    validate_required_text(&payload.state, "state", MAX_SHORT_TEXT_LEN)?;
    validate_list(&payload.benefits, "benefits")?;
    validate_list(&payload.terms, "terms")?;
    Ok(())
}

/// GET /api/clubs?q=
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<ClubOverview>> {
    let clubs = club::search(state.store(), &query.q);
    Json(clubs.into_iter().map(|c| overview(&state, c)).collect())
}

/// GET /api/clubs/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ClubOverview>> {
    let club = club::find_by_id(state.store(), &id).ok_or_else(|| AppError::club_not_found(&id))?;
    Ok(Json(overview(&state, club)))
}

/// POST /api/clubs
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ClubCreate>,
) -> AppResult<(StatusCode, Json<Club>)> {
    validate_create(&payload)?;
    let club = club::create(state.store(), payload)?;
    Ok((StatusCode::CREATED, Json(club)))
}

/// PUT /api/clubs/{id}/benefits - replace benefit and term lists
pub async fn replace_benefits(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ClubBenefitsUpdate>,
) -> AppResult<Json<Club>> {
    validate_list(&payload.benefits, "benefits")?;
    validate_list(&payload.terms, "terms")?;
    let club = club::replace_benefits(state.store(), &id, payload)?;
    tracing::info!(
        club_id = %club.id,
        benefits = club.benefits.len(),
        terms = club.terms.len(),
        "Club benefits replaced"
    );
    Ok(Json(club))
}

/// DELETE /api/clubs/{id} - refused while memberships reference the club
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Club>> {
    club::delete(state.store(), &id).map(Json)
}

#[derive(Debug, Serialize)]
pub struct RegistrationLink {
    pub club_id: String,
    pub url: String,
}

/// GET /api/clubs/{id}/registration-link
pub async fn registration_link(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<RegistrationLink>> {
    let club = club::find_by_id(state.store(), &id).ok_or_else(|| AppError::club_not_found(&id))?;
    Ok(Json(RegistrationLink {
        url: ecard::club_registration_link(&state.config.public_base_url, &club.id),
        club_id: club.id,
    }))
}
