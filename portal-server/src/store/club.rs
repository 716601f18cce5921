//! Club Repository

use shared::models::{Club, ClubBenefitsUpdate, ClubCreate};
use shared::{AppError, AppResult, ErrorCode};

use super::PortalStore;
use crate::utils::validation::clean_list;

pub fn find_all(store: &PortalStore) -> Vec<Club> {
    store.read().clubs.clone()
}

pub fn find_by_id(store: &PortalStore, id: &str) -> Option<Club> {
    store.read().clubs.iter().find(|c| c.id == id).cloned()
}

/// Case-insensitive substring on name or code; blank keeps all
pub fn search(store: &PortalStore, query: &str) -> Vec<Club> {
    let needle = query.trim().to_lowercase();
    store
        .read()
        .clubs
        .iter()
        .filter(|c| {
            needle.is_empty()
                || c.name.to_lowercase().contains(&needle)
                || c.code.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Add a club; codes are unique ignoring case
pub fn create(store: &PortalStore, payload: ClubCreate) -> AppResult<Club> {
    let mut data = store.write();

    let code = payload.code.trim().to_string();
    if data.clubs.iter().any(|c| c.code.eq_ignore_ascii_case(&code)) {
        return Err(AppError::new(ErrorCode::ClubCodeExists).with_detail("code", code));
    }

    let club = Club {
        id: data.next_id("c"),
        name: payload.name.trim().to_string(),
        code,
        pic_name: payload.pic_name.trim().to_string(),
        pic_phone: payload.pic_phone.trim().to_string(),
        email: payload.email.trim().to_string(),
        state: payload.state.trim().to_string(),
        benefits: clean_list(payload.benefits),
        terms: clean_list(payload.terms),
    };

    data.clubs.push(club.clone());
    tracing::info!(club_id = %club.id, code = %club.code, "Club created");
    Ok(club)
}

/// Replace the benefit and term lists wholesale
pub fn replace_benefits(
    store: &PortalStore,
    id: &str,
    payload: ClubBenefitsUpdate,
) -> AppResult<Club> {
    let mut data = store.write();
    let club = data
        .clubs
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| AppError::club_not_found(id))?;

    club.benefits = clean_list(payload.benefits);
    club.terms = clean_list(payload.terms);
    Ok(club.clone())
}

/// Remove a club that no membership references
pub fn delete(store: &PortalStore, id: &str) -> AppResult<Club> {
    let mut data = store.write();
    let idx = data
        .clubs
        .iter()
        .position(|c| c.id == id)
        .ok_or_else(|| AppError::club_not_found(id))?;

    let members = data.members.iter().filter(|m| m.club_id == id).count();
    if members > 0 {
        return Err(AppError::new(ErrorCode::ClubHasMembers)
            .with_detail("club_id", id)
            .with_detail("members", members));
    }

    let club = data.clubs.remove(idx);
    tracing::info!(club_id = %club.id, "Club deleted");
    Ok(club)
}
