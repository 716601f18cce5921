//! SPKA Portal Server - membership portal for the civil-servant welfare association
//!
//! # Overview
//!
//! - **Store** (`store`): in-process repository over clubs, members, partners,
//!   program enrollments and usage logs
//! - **Auth** (`auth`): role sessions carried in JWTs, permission middleware
//! - **Lookup** (`lookup`): membership identity lookup used by verification
//! - **Services** (`services`): AI insight client, e-card renderer, HTTP router
//! - **HTTP API** (`api`): JSON routes per resource
//!
//! # Layout
//!
//! ```text
//! portal-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT sessions, permissions
//! ├── store/         # in-memory repository + demo seed
//! ├── lookup.rs      # identity lookup state machine
//! ├── services/      # insight, ecard, https
//! ├── api/           # route modules
//! └── utils/         # logger, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod lookup;
pub mod services;
pub mod store;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger_with_file};

// Security logging macro - accepts tracing field syntax
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Prepare the process environment before the server starts
///
/// 1. Load `.env` if present
/// 2. Create the work directory
/// 3. Initialise logging (console, plus rolling files outside development)
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let work_dir =
        std::env::var("WORK_DIR").unwrap_or_else(|_| core::config::DEFAULT_WORK_DIR.into());
    std::fs::create_dir_all(&work_dir)?;

    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
    let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
    let json = std::env::var("LOG_JSON")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(environment == "production");

    let log_dir = std::path::Path::new(&work_dir).join("logs");
    if environment == "development" {
        init_logger_with_file(&level, json, None)?;
    } else {
        init_logger_with_file(&level, json, log_dir.to_str())?;
    }

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   _____ ____  __ __ ___
  / ___// __ \/ //_//   |
  \__ \/ /_/ / ,<  / /| |
 ___/ / ____/ /| |/ ___ |
/____/_/   /_/ |_/_/  |_|
      Portal Keahlian
    "#
    );
}
