//! Dashboard aggregates

use shared::models::{DashboardStats, MemberStatus};

use super::PortalStore;

/// Logs shown on the dashboard
pub const RECENT_LOG_LIMIT: usize = 5;

pub fn stats(store: &PortalStore) -> DashboardStats {
    let data = store.read();
    let count = |status: MemberStatus| data.members.iter().filter(|m| m.status == status).count();
    DashboardStats {
        total_members: data.members.len(),
        active_members: count(MemberStatus::Active),
        pending_members: count(MemberStatus::Pending),
        total_clubs: data.clubs.len(),
        total_partners: data.partners.len(),
        recent_logs: data.usage_logs.iter().take(RECENT_LOG_LIMIT).cloned().collect(),
    }
}
