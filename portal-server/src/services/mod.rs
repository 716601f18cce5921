//! Services - components shared by the API handlers
//!
//! - [`insight`] - AI executive summary behind a provider trait
//! - [`ecard`] - digital membership card and share links
//! - [`https`] - router assembly and the HTTP listener

pub mod ecard;
pub mod https;
pub mod insight;

pub use https::{HttpsService, build_app};
pub use insight::{GeminiInsightClient, InsightProvider, InsightService};
