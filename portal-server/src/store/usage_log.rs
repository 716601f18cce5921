//! Usage Log Repository
//!
//! Append-only; the newest entry is kept first.

use chrono::Utc;
use shared::models::{DEFAULT_BENEFIT_TYPE, DEFAULT_LOCATION, UsageLog, UsageLogCreate};
use shared::{AppError, AppResult};

use super::PortalStore;
use crate::lookup::is_valid_for_benefits;

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Record a benefit redemption by `partner_id`
///
/// Only an ACTIVE membership can be logged against.
pub fn create(store: &PortalStore, partner_id: &str, payload: UsageLogCreate) -> AppResult<UsageLog> {
    let mut data = store.write();

    if !data.partners.iter().any(|p| p.id == partner_id) {
        return Err(AppError::partner_not_found(partner_id));
    }
    let member = data
        .members
        .iter()
        .find(|m| m.id == payload.member_id)
        .ok_or_else(|| AppError::member_not_found(&payload.member_id))?;
    if !is_valid_for_benefits(member) {
        return Err(AppError::validation("Membership is not active")
            .with_detail("member_id", member.id.clone())
            .with_detail("status", member.status.as_str()));
    }

    let log = UsageLog {
        id: data.next_id("l"),
        member_id: payload.member_id,
        partner_id: partner_id.to_string(),
        timestamp: Utc::now(),
        benefit_type: or_default(payload.benefit_type, DEFAULT_BENEFIT_TYPE),
        location: or_default(payload.location, DEFAULT_LOCATION),
    };

    data.usage_logs.insert(0, log.clone());
    Ok(log)
}

pub fn find_all(store: &PortalStore) -> Vec<UsageLog> {
    store.read().usage_logs.clone()
}

/// The `n` newest entries
pub fn recent(store: &PortalStore, n: usize) -> Vec<UsageLog> {
    store.read().usage_logs.iter().take(n).cloned().collect()
}

pub fn find_by_partner(store: &PortalStore, partner_id: &str) -> Vec<UsageLog> {
    store
        .read()
        .usage_logs
        .iter()
        .filter(|l| l.partner_id == partner_id)
        .cloned()
        .collect()
}
