use std::path::PathBuf;

use crate::auth::JwtConfig;

/// Default work directory when `WORK_DIR` is unset
pub const DEFAULT_WORK_DIR: &str = "./data/portal";

/// Generative-AI endpoint settings
///
/// `api_key` is the single secret the portal reads; without it the insight
/// endpoint answers with a fixed "not configured" message instead of calling out.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout_ms: u64,
}

impl AiConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("AI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            base_url: std::env::var("AI_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".into()),
            model: std::env::var("AI_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".into()),
            timeout_ms: std::env::var("AI_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(20000),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | ./data/portal | uploads and logs |
/// | HTTP_PORT | 3000 | HTTP port |
/// | ENVIRONMENT | development | development / staging / production |
/// | PUBLIC_BASE_URL | http://localhost:3000 | base of verify/registration links |
/// | AJK_CLUB_ID | c1 | club an AJK session manages |
/// | DEFAULT_PARTNER_ID | p1 | partner used when a session names none |
/// | SEED_DEMO_DATA | true | load demo clubs, partners and members |
/// | REQUEST_TIMEOUT_MS | 30000 | per-request timeout |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | graceful shutdown window |
/// | AI_API_KEY / AI_BASE_URL / AI_MODEL / AI_TIMEOUT_MS | | insight endpoint |
/// | JWT_SECRET / JWT_EXPIRATION_MINUTES / JWT_ISSUER / JWT_AUDIENCE | | session tokens |
///
/// ```ignore
/// WORK_DIR=/srv/spka HTTP_PORT=8080 cargo run -p portal-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Uploads and logs live under here
    pub work_dir: String,
    pub http_port: u16,
    pub jwt: JwtConfig,
    /// development | staging | production
    pub environment: String,
    pub public_base_url: String,
    pub ajk_club_id: String,
    pub default_partner_id: String,
    pub seed_demo_data: bool,
    pub request_timeout_ms: u64,
    pub shutdown_timeout_ms: u64,
    pub ai: AiConfig,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| DEFAULT_WORK_DIR.into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            ajk_club_id: std::env::var("AJK_CLUB_ID").unwrap_or_else(|_| "c1".into()),
            default_partner_id: std::env::var("DEFAULT_PARTNER_ID")
                .unwrap_or_else(|_| "p1".into()),
            seed_demo_data: std::env::var("SEED_DEMO_DATA")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            shutdown_timeout_ms: std::env::var("SHUTDOWN_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10000),
            ai: AiConfig::from_env(),
        }
    }

    /// Override the work directory and port, keeping everything else from the environment
    ///
    /// Used by tests
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// `<work_dir>/uploads/images`
    pub fn images_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("uploads").join("images")
    }

    /// `<work_dir>/logs`
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// Create the directories the server writes into
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.images_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
