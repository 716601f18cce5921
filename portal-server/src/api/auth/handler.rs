//! Session Handlers
//!
//! There are no credentials: a session is opened for a role, the way the
//! portal's role switcher works, and carried in a signed token.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use shared::models::NavItem;
use shared::{AppError, AppResult, Role};

use crate::auth::{CurrentUser, permissions};
use crate::core::ServerState;
use crate::security_log;
use crate::store::{club, partner};

#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub role: Role,
    #[serde(default)]
    pub partner_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub role: Role,
    pub role_label: &'static str,
    /// Absent for PUBLIC; the public pages need no session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub club_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<String>,
    pub permissions: Vec<String>,
    pub menu: Vec<NavItem>,
}

/// POST /api/auth/session
pub async fn open_session(
    State(state): State<ServerState>,
    Json(req): Json<SessionRequest>,
) -> AppResult<Json<SessionResponse>> {
    let (club_id, partner_id) = match req.role {
        Role::Ajk => {
            let id = state.config.ajk_club_id.clone();
            if club::find_by_id(state.store(), &id).is_none() {
                return Err(AppError::club_not_found(id));
            }
            (Some(id), None)
        }
        Role::Partner => {
            let id = req
                .partner_id
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(&state.config.default_partner_id)
                .to_string();
            if partner::find_by_id(state.store(), &id).is_none() {
                return Err(AppError::partner_not_found(id));
            }
            (None, Some(id))
        }
        Role::Admin | Role::Public => (None, None),
    };

    let (token, expires_in) = if req.role == Role::Public {
        (None, None)
    } else {
        let jwt = state.get_jwt_service();
        let token = jwt
            .generate_token(req.role, club_id.as_deref(), partner_id.as_deref())
            .map_err(|e| AppError::internal(format!("Failed to issue session: {}", e)))?;
        (Some(token), Some(jwt.config.expiration_minutes * 60))
    };

    security_log!(
        "INFO",
        "session_opened",
        role = req.role.as_str(),
        partner_id = partner_id.as_deref().unwrap_or("-")
    );

    Ok(Json(SessionResponse {
        role: req.role,
        role_label: req.role.display_name(),
        token,
        expires_in,
        club_id,
        partner_id,
        permissions: permissions::role_permissions(req.role),
        menu: permissions::nav_menu(req.role),
    }))
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    #[serde(flatten)]
    pub user: CurrentUser,
    pub role_label: &'static str,
    pub menu: Vec<NavItem>,
}

/// GET /api/auth/me
pub async fn me(user: CurrentUser) -> Json<MeResponse> {
    let menu = permissions::nav_menu(user.role);
    Json(MeResponse {
        role_label: user.role.display_name(),
        menu,
        user,
    })
}
