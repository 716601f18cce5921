//! Authentication middleware
//!
//! Axum middleware for session authentication and permission checks.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::AppError;

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;

/// API routes reachable without a session
///
/// A valid token on these is still decoded, so handlers can tailor the
/// response (a partner on `/api/verify` may log usage).
fn is_public_api_route(path: &str) -> bool {
    path == "/api/auth/session"
        || path == "/api/registrations"
        || path == "/api/verify"
        || path.starts_with("/api/registration/")
        || path.starts_with("/api/image/")
}

/// Authentication middleware
///
/// Reads `Authorization: Bearer <token>` and, when valid, inserts
/// [`CurrentUser`] into the request extensions.
///
/// # Skipped
///
/// - `OPTIONS *` (CORS preflight)
/// - non `/api/` paths
/// - public API routes (token optional)
///
/// # Errors
///
/// | Case | Status |
/// |------|--------|
/// | no Authorization header | 401 NotAuthenticated |
/// | expired token | 401 TokenExpired |
/// | invalid token | 401 TokenInvalid |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let path = req.uri().path().to_string();
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }
    let public = is_public_api_route(&path);

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);

    let token = match auth_header.as_deref().map(JwtService::extract_from_header) {
        Some(Some(token)) => token,
        Some(None) if public => return Ok(next.run(req).await),
        Some(None) => return Err(AppError::invalid_token("Invalid authorization header")),
        None if public => return Ok(next.run(req).await),
        None => {
            security_log!("WARN", "auth_missing", uri = path.as_str());
            return Err(AppError::unauthorized());
        }
    };

    match state.get_jwt_service().validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::try_from(claims)
                .map_err(|e| AppError::invalid_token(format!("Malformed session claims: {}", e)))?;
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = e.to_string().as_str(),
                uri = path.as_str()
            );

            if public {
                return Ok(next.run(req).await);
            }
            match e {
                JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

/// Permission middleware
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .route("/api/members", get(handler::list))
///     .layer(middleware::from_fn(require_permission("members:view")));
/// ```
///
/// Missing session is 401, missing permission is 403.
pub fn require_permission(
    permission: &'static str,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or(AppError::unauthorized())?;

            if !user.has_permission(permission) {
                security_log!(
                    "WARN",
                    "permission_denied",
                    session_id = user.session_id.as_str(),
                    role = user.role.as_str(),
                    required_permission = permission
                );
                return Err(AppError::forbidden(format!(
                    "Permission denied: {}",
                    permission
                )));
            }

            Ok(next.run(req).await)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_routes() {
        assert!(is_public_api_route("/api/auth/session"));
        assert!(is_public_api_route("/api/registration/clubs/c1"));
        assert!(is_public_api_route("/api/registration/programs/p1/prog-1/enrollments"));
        assert!(is_public_api_route("/api/image/abc.jpg"));
        assert!(is_public_api_route("/api/verify"));
        assert!(!is_public_api_route("/api/auth/me"));
        assert!(!is_public_api_route("/api/members"));
        assert!(!is_public_api_route("/api/usage-logs"));
        assert!(!is_public_api_route("/api/verify/extra"));
    }
}
