//! Data models
//!
//! Shared between portal-server and the frontend (via API).
//! All IDs are prefixed timestamp strings (`c…`, `m…`, `p…`, `prog-…`, `pm…`, `l…`).

pub mod club;
pub mod dashboard;
pub mod enrollment;
pub mod member;
pub mod partner;
pub mod role;
pub mod usage_log;

// Re-exports
pub use club::*;
pub use dashboard::*;
pub use enrollment::*;
pub use member::*;
pub use partner::*;
pub use role::*;
pub use usage_log::*;
