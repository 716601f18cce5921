use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use shared::models::{Member, MemberStatus};
use shared::{AppError, AppResult, Role};

use crate::auth::{OptionalUser, permissions};
use crate::core::ServerState;
use crate::lookup::{LookupState, is_valid_for_benefits};
use crate::services::ecard::{self, EcardView};
use crate::store::member;

#[derive(Debug, Deserialize)]
pub struct VerifyQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub select: Option<String>,
}

/// What a match list discloses before one record is picked
#[derive(Debug, Serialize)]
pub struct MatchSummary {
    pub id: String,
    pub full_name: String,
    pub club_name: String,
    pub status: MemberStatus,
}

#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum VerifyView {
    Idle,
    Found {
        matches: Vec<MatchSummary>,
    },
    NotFound,
    Selected {
        card: EcardView,
        valid_for_benefits: bool,
        matches: Vec<MatchSummary>,
    },
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    #[serde(flatten)]
    pub view: VerifyView,
    /// Partner session looking at an active membership
    pub can_log_usage: bool,
}

fn summarize(state: &ServerState, members: &[Member]) -> Vec<MatchSummary> {
    members
        .iter()
        .map(|m| MatchSummary {
            id: m.id.clone(),
            full_name: m.full_name.clone(),
            club_name: member::find_by_id(state.store(), &m.id)
                .map(|w| w.club_name)
                .unwrap_or_else(|| crate::store::UNKNOWN_CLUB.to_string()),
            status: m.status,
        })
        .collect()
}

/// GET /api/verify
pub async fn verify(
    State(state): State<ServerState>,
    OptionalUser(user): OptionalUser,
    Query(query): Query<VerifyQuery>,
) -> AppResult<Json<VerifyResponse>> {
    let mut lookup = LookupState::default();
    lookup.search(&member::records(state.store()), &query.q);

    if let Some(id) = query.select.as_deref().filter(|s| !s.trim().is_empty()) {
        lookup.select(id.trim())?;
    }

    let matches = summarize(&state, lookup.matches());
    let (view, active) = match &lookup {
        LookupState::Idle => (VerifyView::Idle, false),
        LookupState::NotFound => (VerifyView::NotFound, false),
        LookupState::Found { .. } => (VerifyView::Found { matches }, false),
        LookupState::Selected { member: selected, .. } => {
            let with_club = member::find_by_id(state.store(), &selected.id)
                .ok_or_else(|| AppError::member_not_found(&selected.id))?;
            let card = ecard::build_view(&with_club, &state.config.public_base_url)?;
            let valid = is_valid_for_benefits(selected);
            (
                VerifyView::Selected {
                    card,
                    valid_for_benefits: valid,
                    matches,
                },
                valid,
            )
        }
    };

    let can_log_usage = active
        && user.as_ref().is_some_and(|u| {
            u.role == Role::Partner && u.has_permission(permissions::USAGE_LOG)
        });

    Ok(Json(VerifyResponse {
        view,
        can_log_usage,
    }))
}
