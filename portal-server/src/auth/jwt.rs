//! JWT session tokens
//!
//! Issue, validate and decode role sessions.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use shared::{AppError, AppResult, ErrorCode, Role};
use thiserror::Error;

use super::permissions;

/// Minimum accepted `JWT_SECRET` length
const MIN_SECRET_LEN: usize = 32;

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Signing secret (at least 32 bytes)
    pub secret: String,
    /// Token lifetime in minutes
    pub expiration_minutes: i64,
    pub issuer: String,
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        let secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if secret.len() >= MIN_SECRET_LEN => secret,
            Ok(_) => {
                tracing::error!(
                    "JWT_SECRET must be at least {} characters, using a temporary key",
                    MIN_SECRET_LEN
                );
                generate_secure_printable_jwt_secret()
            }
            Err(_) => {
                tracing::warn!("JWT_SECRET not set, sessions will not survive a restart");
                generate_secure_printable_jwt_secret()
            }
        };

        Self {
            secret,
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(480), // one working day
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "spka-portal".to_string()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "spka-portal-clients".to_string()),
        }
    }
}

/// Claims stored in a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Session id (Subject)
    pub sub: String,
    /// Role identifier, e.g. `AJK`
    pub role: String,
    /// Club an AJK session manages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club_id: Option<String>,
    /// Partner a PARTNER session acts for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<String>,
    /// Comma separated permissions
    pub permissions: String,
    pub token_type: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub aud: String,
}

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

/// Random 64-character printable secret
pub fn generate_secure_printable_jwt_secret() -> String {
    const ALLOWED: &[u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+";

    let rng = SystemRandom::new();
    let mut bytes = [0u8; 64];
    if rng.fill(&mut bytes).is_err() {
        tracing::error!("System RNG unavailable, falling back to time-seeded secret");
        return format!(
            "spka-fallback-{}-{}",
            Utc::now().timestamp_nanos_opt().unwrap_or_default(),
            std::process::id()
        );
    }

    bytes
        .iter()
        .map(|b| ALLOWED[*b as usize % ALLOWED.len()] as char)
        .collect()
}

/// JWT service
#[derive(Debug, Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    /// Service with configuration from the environment
    pub fn new() -> Self {
        Self::with_config(JwtConfig::default())
    }

    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue a session token for `role`
    ///
    /// The role's permissions are embedded so middleware never needs a lookup.
    pub fn generate_token(
        &self,
        role: Role,
        club_id: Option<&str>,
        partner_id: Option<&str>,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: shared::util::prefixed_id("s"),
            role: role.as_str().to_string(),
            club_id: club_id.map(str::to_string),
            partner_id: partner_id.map(str::to_string),
            permissions: permissions::role_permissions(role).join(","),
            token_type: "access".to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Validate and decode a token
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Token from an `Authorization` header value
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new()
    }
}

/// Session context (decoded from JWT claims)
///
/// Inserted by [`require_auth`](super::require_auth); handlers take it as an extractor.
///
/// ```ignore
/// async fn handler(user: CurrentUser) -> AppResult<Json<()>> {
///     if let Some(club_id) = user.club_scope()? {
///         // AJK: restrict to own club
///     }
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub session_id: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub club_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<String>,
    pub permissions: Vec<String>,
}

impl TryFrom<Claims> for CurrentUser {
    type Error = JwtError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let role: Role = claims.role.parse().map_err(JwtError::InvalidToken)?;
        let permissions = if claims.permissions.is_empty() {
            vec![]
        } else {
            claims
                .permissions
                .split(',')
                .map(|s| s.to_string())
                .collect()
        };

        Ok(Self {
            session_id: claims.sub,
            role,
            club_id: claims.club_id,
            partner_id: claims.partner_id,
            permissions,
        })
    }
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Check a single permission
    ///
    /// 1. Admin holds every permission
    /// 2. `"all"` grants everything
    /// 3. Exact match, or prefix match through a `resource:*` wildcard
    pub fn has_permission(&self, permission: &str) -> bool {
        if self.is_admin() {
            return true;
        }

        self.permissions.iter().any(|p| {
            if p == "all" || p == permission {
                return true;
            }
            p.strip_suffix(":*")
                .is_some_and(|prefix| permission.starts_with(&format!("{}:", prefix)))
        })
    }

    /// Club this session is restricted to (AJK only)
    ///
    /// An AJK session without a club sees nothing.
    pub fn club_scope(&self) -> AppResult<Option<&str>> {
        match (self.role, self.club_id.as_deref()) {
            (Role::Ajk, Some(club_id)) => Ok(Some(club_id)),
            (Role::Ajk, None) => Err(AppError::with_message(
                ErrorCode::ClubScopeViolation,
                "AJK session is not bound to a club",
            )),
            _ => Ok(None),
        }
    }

    /// Whether a record of `club_id` is visible to this session
    pub fn can_access_club(&self, club_id: &str) -> bool {
        match self.role {
            Role::Admin => true,
            Role::Ajk => self.club_id.as_deref() == Some(club_id),
            _ => false,
        }
    }
}
