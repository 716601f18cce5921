//! Member Repository

use chrono::Local;
use shared::models::{Member, MemberCreate, MemberStatus, MemberWithClub};
use shared::{AppError, AppResult, ErrorCode};

use super::{PortalData, PortalStore};
use crate::lookup::normalize_identifier;

fn with_club(data: &PortalData, member: &Member) -> MemberWithClub {
    MemberWithClub {
        member: member.clone(),
        club_name: data.club_name(&member.club_id),
    }
}

/// All memberships, newest registration first
pub fn find_all(store: &PortalStore) -> Vec<MemberWithClub> {
    let data = store.read();
    data.members.iter().map(|m| with_club(&data, m)).collect()
}

/// Memberships of one club
pub fn find_by_club(store: &PortalStore, club_id: &str) -> Vec<MemberWithClub> {
    let data = store.read();
    data.members
        .iter()
        .filter(|m| m.club_id == club_id)
        .map(|m| with_club(&data, m))
        .collect()
}

pub fn find_by_id(store: &PortalStore, id: &str) -> Option<MemberWithClub> {
    let data = store.read();
    data.members
        .iter()
        .find(|m| m.id == id)
        .map(|m| with_club(&data, m))
}

/// Raw records, used by the identity lookup
pub fn records(store: &PortalStore) -> Vec<Member> {
    store.read().members.clone()
}

/// Admin list filter
///
/// Case-insensitive substring on the name, or plain substring on the IC as
/// typed. `club_id` narrows the result to one club. A blank query keeps all.
pub fn search(store: &PortalStore, query: &str, club_id: Option<&str>) -> Vec<MemberWithClub> {
    let query = query.trim();
    let needle = query.to_lowercase();
    let data = store.read();
    data.members
        .iter()
        .filter(|m| club_id.is_none_or(|c| m.club_id == c))
        .filter(|m| {
            query.is_empty()
                || m.full_name.to_lowercase().contains(&needle)
                || m.ic_no.contains(query)
        })
        .map(|m| with_club(&data, m))
        .collect()
}

/// Register a new membership
///
/// Always starts PENDING with today's date. Fails when the club does not
/// exist or the same person already holds a pending/active membership there.
pub fn create(store: &PortalStore, payload: MemberCreate) -> AppResult<MemberWithClub> {
    let mut data = store.write();

    if !data.clubs.iter().any(|c| c.id == payload.club_id) {
        return Err(AppError::club_not_found(&payload.club_id));
    }

    let ic_key = normalize_identifier(&payload.ic_no);
    let duplicate = data.members.iter().any(|m| {
        m.club_id == payload.club_id
            && m.status.is_open()
            && normalize_identifier(&m.ic_no) == ic_key
    });
    if duplicate {
        return Err(AppError::new(ErrorCode::MemberAlreadyRegistered)
            .with_detail("club_id", payload.club_id.clone()));
    }

    let member = Member {
        id: data.next_id("m"),
        full_name: payload.full_name.trim().to_string(),
        ic_no: payload.ic_no.trim().to_string(),
        email: payload.email.trim().to_string(),
        phone: payload.phone.trim().to_string(),
        address: payload.address.trim().to_string(),
        club_id: payload.club_id,
        status: MemberStatus::Pending,
        applied_date: Local::now().date_naive(),
        approved_date: None,
        profile_pic_url: payload.profile_pic_url.unwrap_or_default(),
        staff_id_url: payload.staff_id_url.unwrap_or_default(),
        age: payload.age,
    };

    data.members.insert(0, member.clone());
    Ok(with_club(&data, &member))
}

/// Move a membership through its lifecycle
///
/// ACTIVE stamps today's approval date; every other target clears it.
pub fn update_status(
    store: &PortalStore,
    id: &str,
    status: MemberStatus,
) -> AppResult<MemberWithClub> {
    let mut data = store.write();
    let member = data
        .members
        .iter_mut()
        .find(|m| m.id == id)
        .ok_or_else(|| AppError::member_not_found(id))?;

    if !member.status.can_transition_to(status) {
        return Err(AppError::with_message(
            ErrorCode::InvalidStatusTransition,
            format!("Cannot change status from {} to {}", member.status, status),
        )
        .with_detail("from", member.status.as_str())
        .with_detail("to", status.as_str()));
    }

    member.status = status;
    member.approved_date = match status {
        MemberStatus::Active => Some(Local::now().date_naive()),
        _ => None,
    };

    let member = member.clone();
    Ok(with_club(&data, &member))
}

/// Number of memberships referencing a club
pub fn count_by_club(store: &PortalStore, club_id: &str) -> usize {
    store
        .read()
        .members
        .iter()
        .filter(|m| m.club_id == club_id)
        .count()
}
