//! Partner Repository
//!
//! Partners own their programs; program operations go through the partner.

use shared::models::{BenefitPartner, PartnerCreate, PartnerUpdate, Program, ProgramUpsert};
use shared::{AppError, AppResult, ErrorCode};

use super::{PortalData, PortalStore};
use crate::utils::validation::clean_list;

pub fn find_all(store: &PortalStore) -> Vec<BenefitPartner> {
    store.read().partners.clone()
}

pub fn find_by_id(store: &PortalStore, id: &str) -> Option<BenefitPartner> {
    store.read().partners.iter().find(|p| p.id == id).cloned()
}

/// Case-insensitive substring on company, location or any offer tag
pub fn search(store: &PortalStore, query: &str) -> Vec<BenefitPartner> {
    let needle = query.trim().to_lowercase();
    store
        .read()
        .partners
        .iter()
        .filter(|p| {
            needle.is_empty()
                || p.company_name.to_lowercase().contains(&needle)
                || p.location.to_lowercase().contains(&needle)
                || p.offers.iter().any(|o| o.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Add a partner, with one empty program per non-blank name
pub fn create(store: &PortalStore, payload: PartnerCreate) -> AppResult<BenefitPartner> {
    let mut data = store.write();

    let mut programs = Vec::new();
    for name in clean_list(payload.program_names) {
        let id = next_program_id(&data, &programs);
        programs.push(Program {
            id,
            name,
            benefits: Vec::new(),
            terms: Vec::new(),
        });
    }

    let partner = BenefitPartner {
        id: data.next_id("p"),
        company_name: payload.company_name.trim().to_string(),
        description: payload.description.trim().to_string(),
        offers: clean_list(payload.offers),
        location: payload.location.trim().to_string(),
        programs,
    };

    data.partners.push(partner.clone());
    tracing::info!(partner_id = %partner.id, programs = partner.programs.len(), "Partner created");
    Ok(partner)
}

/// Ids handed out in one batch must not collide with each other either
fn next_program_id(data: &PortalData, pending: &[Program]) -> String {
    loop {
        let id = data.next_id("prog-");
        if !pending.iter().any(|p| p.id == id) {
            return id;
        }
    }
}

/// Update partner settings; absent fields are kept
pub fn update(store: &PortalStore, id: &str, payload: PartnerUpdate) -> AppResult<BenefitPartner> {
    let mut data = store.write();
    let partner = data
        .partners
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| AppError::partner_not_found(id))?;

    if let Some(name) = payload.company_name {
        partner.company_name = name.trim().to_string();
    }
    if let Some(description) = payload.description {
        partner.description = description.trim().to_string();
    }
    if let Some(location) = payload.location {
        partner.location = location.trim().to_string();
    }
    if let Some(offers) = payload.offers {
        partner.offers = clean_list(offers);
    }
    Ok(partner.clone())
}

/// Resolve a partner and one of its programs
pub fn find_program(
    store: &PortalStore,
    partner_id: &str,
    program_id: &str,
) -> AppResult<(BenefitPartner, Program)> {
    let partner =
        find_by_id(store, partner_id).ok_or_else(|| AppError::partner_not_found(partner_id))?;
    let program = partner
        .programs
        .iter()
        .find(|p| p.id == program_id)
        .cloned()
        .ok_or_else(|| AppError::program_not_found(program_id))?;
    Ok((partner, program))
}

fn program_name(payload: &ProgramUpsert) -> AppResult<String> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::new(ErrorCode::ProgramNameRequired));
    }
    Ok(name.to_string())
}

pub fn add_program(
    store: &PortalStore,
    partner_id: &str,
    payload: ProgramUpsert,
) -> AppResult<Program> {
    let name = program_name(&payload)?;
    let mut data = store.write();
    let id = data.next_id("prog-");
    let partner = data
        .partners
        .iter_mut()
        .find(|p| p.id == partner_id)
        .ok_or_else(|| AppError::partner_not_found(partner_id))?;

    let program = Program {
        id,
        name,
        benefits: clean_list(payload.benefits),
        terms: clean_list(payload.terms),
    };
    partner.programs.push(program.clone());
    Ok(program)
}

/// Rename a program and replace its lists
pub fn update_program(
    store: &PortalStore,
    partner_id: &str,
    program_id: &str,
    payload: ProgramUpsert,
) -> AppResult<Program> {
    let name = program_name(&payload)?;
    let mut data = store.write();
    let program = data
        .partners
        .iter_mut()
        .find(|p| p.id == partner_id)
        .ok_or_else(|| AppError::partner_not_found(partner_id))?
        .programs
        .iter_mut()
        .find(|p| p.id == program_id)
        .ok_or_else(|| AppError::program_not_found(program_id))?;

    program.name = name;
    program.benefits = clean_list(payload.benefits);
    program.terms = clean_list(payload.terms);
    Ok(program.clone())
}

/// Remove a program together with its enrollments
///
/// Returns the removed program and how many enrollments went with it.
pub fn delete_program(
    store: &PortalStore,
    partner_id: &str,
    program_id: &str,
) -> AppResult<(Program, usize)> {
    let mut data = store.write();
    let partner = data
        .partners
        .iter_mut()
        .find(|p| p.id == partner_id)
        .ok_or_else(|| AppError::partner_not_found(partner_id))?;
    let idx = partner
        .programs
        .iter()
        .position(|p| p.id == program_id)
        .ok_or_else(|| AppError::program_not_found(program_id))?;
    let program = partner.programs.remove(idx);

    let before = data.enrollments.len();
    data.enrollments
        .retain(|e| !(e.partner_id == partner_id && e.program_id == program_id));
    let removed = before - data.enrollments.len();

    tracing::info!(
        partner_id = %partner_id,
        program_id = %program_id,
        enrollments_removed = removed,
        "Program deleted"
    );
    Ok((program, removed))
}
