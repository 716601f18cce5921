//! Partner API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use shared::models::{
    BenefitPartner, EnrollmentCreate, EnrollmentStatusUpdate, PartnerCreate, PartnerUpdate,
    Program, ProgramEnrollment, ProgramUpsert,
};
use shared::{AppError, AppResult};

use crate::core::ServerState;
use crate::services::ecard;
use crate::store::{enrollment, partner};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, validate_applicant, validate_list, validate_optional_text,
    validate_required_text,
};

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// GET /api/partners?q=
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<BenefitPartner>> {
    Json(partner::search(state.store(), &query.q))
}

/// GET /api/partners/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<BenefitPartner>> {
    partner::find_by_id(state.store(), &id)
        .map(Json)
        .ok_or_else(|| AppError::partner_not_found(id))
}

/// POST /api/partners
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PartnerCreate>,
) -> AppResult<(StatusCode, Json<BenefitPartner>)> {
    validate_required_text(&payload.company_name, "company_name", MAX_NAME_LEN)?;
    validate_required_text(&payload.location, "location", MAX_ADDRESS_LEN)?;
    if payload.description.len() > MAX_ADDRESS_LEN {
        return Err(AppError::validation("description is too long")
            .with_detail("field", "description"));
    }
    validate_list(&payload.offers, "offers")?;
    validate_list(&payload.program_names, "program_names")?;

    let created = partner::create(state.store(), payload)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/partners/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<PartnerUpdate>,
) -> AppResult<Json<BenefitPartner>> {
    if let Some(name) = &payload.company_name {
        validate_required_text(name, "company_name", MAX_NAME_LEN)?;
    }
    if let Some(location) = &payload.location {
        validate_required_text(location, "location", MAX_ADDRESS_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_ADDRESS_LEN)?;
    if let Some(offers) = &payload.offers {
        validate_list(offers, "offers")?;
    }

    let updated = partner::update(state.store(), &id, payload)?;
    tracing::info!(partner_id = %id, "Partner updated");
    Ok(Json(updated))
}

fn validate_program(payload: &ProgramUpsert) -> AppResult<()> {
    if payload.name.len() > MAX_NAME_LEN {
        return Err(AppError::validation("name is too long").with_detail("field", "name"));
    }
    validate_list(&payload.benefits, "benefits")?;
    validate_list(&payload.terms, "terms")
}

/// POST /api/partners/{id}/programs
pub async fn add_program(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ProgramUpsert>,
) -> AppResult<(StatusCode, Json<Program>)> {
    validate_program(&payload)?;
    let program = partner::add_program(state.store(), &id, payload)?;
    tracing::info!(partner_id = %id, program_id = %program.id, "Program added");
    Ok((StatusCode::CREATED, Json(program)))
}

/// PUT /api/partners/{id}/programs/{program_id}
pub async fn update_program(
    State(state): State<ServerState>,
    Path((id, program_id)): Path<(String, String)>,
    Json(payload): Json<ProgramUpsert>,
) -> AppResult<Json<Program>> {
    validate_program(&payload)?;
    partner::update_program(state.store(), &id, &program_id, payload).map(Json)
}

#[derive(Debug, Serialize)]
pub struct ProgramDeleted {
    pub program: Program,
    pub removed_enrollments: usize,
}

/// DELETE /api/partners/{id}/programs/{program_id} - not recoverable
pub async fn delete_program(
    State(state): State<ServerState>,
    Path((id, program_id)): Path<(String, String)>,
) -> AppResult<Json<ProgramDeleted>> {
    let (program, removed_enrollments) = partner::delete_program(state.store(), &id, &program_id)?;
    Ok(Json(ProgramDeleted {
        program,
        removed_enrollments,
    }))
}

#[derive(Debug, Serialize)]
pub struct ProgramLink {
    pub partner_id: String,
    pub program_id: String,
    pub url: String,
}

/// GET /api/partners/{id}/programs/{program_id}/registration-link
pub async fn program_link(
    State(state): State<ServerState>,
    Path((id, program_id)): Path<(String, String)>,
) -> AppResult<Json<ProgramLink>> {
    let (partner, program) = partner::find_program(state.store(), &id, &program_id)?;
    Ok(Json(ProgramLink {
        url: ecard::program_registration_link(
            &state.config.public_base_url,
            &partner.id,
            &program.id,
        ),
        partner_id: partner.id,
        program_id: program.id,
    }))
}

/// GET /api/partners/{id}/enrollments?q=
pub async fn list_enrollments(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<ProgramEnrollment>>> {
    if partner::find_by_id(state.store(), &id).is_none() {
        return Err(AppError::partner_not_found(id));
    }
    Ok(Json(enrollment::find_by_partner(
        state.store(),
        &id,
        Some(&query.q),
    )))
}

/// POST /api/partners/{id}/enrollments - admin entry, enrolled ACTIVE
pub async fn add_enrollment(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<EnrollmentCreate>,
) -> AppResult<(StatusCode, Json<ProgramEnrollment>)> {
    validate_applicant(&payload.applicant)?;
    let created =
        enrollment::add_by_admin(state.store(), &id, &payload.program_id, payload.applicant)?;
    tracing::info!(
        enrollment_id = %created.id,
        partner_id = %id,
        program_id = %created.program_id,
        "Program member added"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/partners/{id}/enrollments/{enrollment_id}/status
pub async fn update_enrollment_status(
    State(state): State<ServerState>,
    Path((id, enrollment_id)): Path<(String, String)>,
    Json(payload): Json<EnrollmentStatusUpdate>,
) -> AppResult<Json<ProgramEnrollment>> {
    enrollment::update_status(state.store(), &id, &enrollment_id, payload.status).map(Json)
}
