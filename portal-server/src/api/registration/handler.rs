//! Public registration handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{
    ClubSummary, EnrollmentApplicant, MemberCreate, MemberWithClub, ProgramEnrollment,
    ProgramRegistrationContext,
};
use shared::{AppError, AppResult, ErrorCode};

use crate::core::ServerState;
use crate::store::{club, enrollment, member, partner};
use crate::utils::validation::{validate_applicant, validate_member_create};

/// Shown when a program link points at an unknown partner
const LINK_INVALID: &str = "Pautan tidak sah atau telah luput.";
/// Shown when the partner exists but the program does not
const PROGRAM_MISSING: &str = "Pakej/Kelab tidak ditemui.";

/// GET /api/registration/clubs
pub async fn list_clubs(State(state): State<ServerState>) -> Json<Vec<ClubSummary>> {
    let clubs = club::find_all(state.store());
    Json(clubs.iter().map(ClubSummary::from).collect())
}

/// GET /api/registration/clubs/{club_id}
pub async fn get_club(
    State(state): State<ServerState>,
    Path(club_id): Path<String>,
) -> AppResult<Json<ClubSummary>> {
    let club = club::find_by_id(state.store(), &club_id).ok_or_else(|| {
        AppError::with_message(ErrorCode::RegistrationLinkInvalid, LINK_INVALID)
            .with_detail("club_id", club_id.clone())
    })?;
    Ok(Json(ClubSummary::from(&club)))
}

/// POST /api/registrations - new applications always start PENDING
pub async fn register_member(
    State(state): State<ServerState>,
    Json(payload): Json<MemberCreate>,
) -> AppResult<(StatusCode, Json<MemberWithClub>)> {
    validate_member_create(&payload)?;
    let created = member::create(state.store(), payload)?;
    tracing::info!(
        member_id = %created.member.id,
        club_id = %created.member.club_id,
        "Membership application received"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

fn resolve_program(
    state: &ServerState,
    partner_id: &str,
    program_id: &str,
) -> AppResult<ProgramRegistrationContext> {
    match partner::find_program(state.store(), partner_id, program_id) {
        Ok((partner, program)) => Ok(ProgramRegistrationContext {
            partner_id: partner.id,
            company_name: partner.company_name,
            location: partner.location,
            program,
        }),
        Err(e) if e.code == ErrorCode::PartnerNotFound => Err(AppError::with_message(
            ErrorCode::RegistrationLinkInvalid,
            LINK_INVALID,
        )
        .with_detail("partner_id", partner_id)),
        Err(e) if e.code == ErrorCode::ProgramNotFound => Err(AppError::with_message(
            ErrorCode::ProgramNotFound,
            PROGRAM_MISSING,
        )
        .with_detail("program_id", program_id)),
        Err(e) => Err(e),
    }
}

/// GET /api/registration/programs/{partner_id}/{program_id}
pub async fn program_context(
    State(state): State<ServerState>,
    Path((partner_id, program_id)): Path<(String, String)>,
) -> AppResult<Json<ProgramRegistrationContext>> {
    resolve_program(&state, &partner_id, &program_id).map(Json)
}

/// POST /api/registration/programs/{partner_id}/{program_id}/enrollments
pub async fn enroll(
    State(state): State<ServerState>,
    Path((partner_id, program_id)): Path<(String, String)>,
    Json(applicant): Json<EnrollmentApplicant>,
) -> AppResult<(StatusCode, Json<ProgramEnrollment>)> {
    resolve_program(&state, &partner_id, &program_id)?;
    validate_applicant(&applicant)?;

    let created = enrollment::register(state.store(), &partner_id, &program_id, applicant)?;
    tracing::info!(
        enrollment_id = %created.id,
        partner_id = %partner_id,
        program_id = %program_id,
        "Program registration received"
    );
    Ok((StatusCode::CREATED, Json(created)))
}
