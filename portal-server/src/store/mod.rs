//! Store Module
//!
//! In-process repository over the portal's records. One [`PortalStore`] is
//! shared through `ServerState`; the entity modules expose plain functions
//! taking `&PortalStore`, the same way handlers would call a database pool.

pub mod club;
pub mod dashboard;
pub mod enrollment;
pub mod member;
pub mod partner;
pub mod seed;
pub mod usage_log;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use shared::models::{BenefitPartner, Club, Member, ProgramEnrollment, UsageLog};

/// Raw tables
#[derive(Debug, Default, Clone)]
pub struct PortalData {
    pub clubs: Vec<Club>,
    pub members: Vec<Member>,
    pub partners: Vec<BenefitPartner>,
    pub enrollments: Vec<ProgramEnrollment>,
    /// Newest first
    pub usage_logs: Vec<UsageLog>,
}

impl PortalData {
    /// True when any table already holds `id`
    fn id_taken(&self, id: &str) -> bool {
        self.clubs.iter().any(|c| c.id == id)
            || self.members.iter().any(|m| m.id == id)
            || self.partners.iter().any(|p| p.id == id)
            || self
                .partners
                .iter()
                .flat_map(|p| p.programs.iter())
                .any(|p| p.id == id)
            || self.enrollments.iter().any(|e| e.id == id)
            || self.usage_logs.iter().any(|l| l.id == id)
    }

    /// Fresh timestamp-based id, regenerated on collision
    pub(crate) fn next_id(&self, prefix: &str) -> String {
        loop {
            let id = shared::util::prefixed_id(prefix);
            if !self.id_taken(&id) {
                return id;
            }
        }
    }

    pub(crate) fn club_name(&self, club_id: &str) -> String {
        self.clubs
            .iter()
            .find(|c| c.id == club_id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| UNKNOWN_CLUB.to_string())
    }
}

/// Shown when a member references a club that no longer resolves
pub const UNKNOWN_CLUB: &str = "Unknown Club";

/// Shared in-memory store
#[derive(Debug, Default)]
pub struct PortalStore {
    data: RwLock<PortalData>,
}

impl PortalStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with the demo clubs, partners, members and logs
    pub fn seeded() -> Self {
        Self::from_data(seed::demo_data())
    }

    pub fn from_data(data: PortalData) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, PortalData> {
        self.data.read()
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, PortalData> {
        self.data.write()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_id_has_prefix_and_is_free() {
        let store = PortalStore::seeded();
        let data = store.read();
        let id = data.next_id("m");
        assert!(id.starts_with('m'));
        assert!(!data.id_taken(&id));
        assert!(data.id_taken("m1"));
        assert!(data.id_taken("prog-2"));
    }

    #[test]
    fn test_club_name_falls_back() {
        let store = PortalStore::seeded();
        let data = store.read();
        assert_eq!(data.club_name("c2"), "Kelab Kebajikan Guru");
        assert_eq!(data.club_name("c404"), UNKNOWN_CLUB);
    }
}
