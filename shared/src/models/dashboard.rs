//! Dashboard Model

use serde::{Deserialize, Serialize};

use super::UsageLog;

/// Aggregate figures shown on the staff dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_members: usize,
    pub active_members: usize,
    pub pending_members: usize,
    pub total_clubs: usize,
    pub total_partners: usize,
    /// Newest first, at most five
    pub recent_logs: Vec<UsageLog>,
}

/// AI executive summary response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightResponse {
    pub summary: String,
}
