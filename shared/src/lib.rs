//! Shared types for the membership portal
//!
//! Domain models, the unified error system and small utilities used by the
//! portal server and its tests.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::Role;
pub use serde::{Deserialize, Serialize};
