//! Membership identity lookup
//!
//! One person may hold a membership in several clubs, each a separate record
//! sharing the same national ID. A lookup by IC or membership id therefore
//! returns every matching record, and the caller walks a small state machine:
//!
//! ```text
//! Idle ──search(q)──▶ Found { matches } ──select(id)──▶ Selected { member, matches }
//!   ▲                  │                                   │
//!   │                  └─search(q)─▶ NotFound              └─search(q)─▶ ...
//!   └──────────── reset() / blank query ◀──────────────────────┘
//! ```
//!
//! Only `Selected` discloses a full record; `Found` lists summaries.

use serde::Serialize;
use shared::models::{Member, MemberStatus};
use shared::{AppError, AppResult};

/// Keep ASCII letters and digits, lowercased
///
/// `"850101-10-5555"` and `"850101105555"` normalise to the same key.
pub fn normalize_identifier(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Every record whose normalised id or national ID equals the normalised query
///
/// Order follows `members`. A query with nothing alphanumeric matches nothing.
pub fn find_all_memberships<'a>(members: &'a [Member], query: &str) -> Vec<&'a Member> {
    let key = normalize_identifier(query);
    if key.is_empty() {
        return Vec::new();
    }
    members
        .iter()
        .filter(|m| normalize_identifier(&m.id) == key || normalize_identifier(&m.ic_no) == key)
        .collect()
}

/// Lookup outcome as shown to the verifier
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LookupState {
    #[default]
    Idle,
    Found { matches: Vec<Member> },
    NotFound,
    Selected { member: Member, matches: Vec<Member> },
}

impl LookupState {
    /// Run a new search; any previous selection is dropped
    ///
    /// A blank query leaves the lookup idle without searching.
    pub fn search(&mut self, members: &[Member], query: &str) {
        if query.trim().is_empty() {
            *self = LookupState::Idle;
            return;
        }
        let matches: Vec<Member> = find_all_memberships(members, query)
            .into_iter()
            .cloned()
            .collect();
        *self = if matches.is_empty() {
            LookupState::NotFound
        } else {
            LookupState::Found { matches }
        };
    }

    /// Pick one record among the current matches
    ///
    /// Fails, leaving the state untouched, when `member_id` is not one of them.
    pub fn select(&mut self, member_id: &str) -> AppResult<Member> {
        let member = self
            .matches()
            .iter()
            .find(|m| m.id == member_id)
            .cloned()
            .ok_or_else(|| AppError::member_not_found(member_id))?;

        let matches = match std::mem::take(self) {
            LookupState::Found { matches } | LookupState::Selected { matches, .. } => matches,
            _ => Vec::new(),
        };
        *self = LookupState::Selected {
            member: member.clone(),
            matches,
        };
        Ok(member)
    }

    pub fn reset(&mut self) {
        *self = LookupState::Idle;
    }

    /// Current candidates, empty unless found or selected
    pub fn matches(&self) -> &[Member] {
        match self {
            LookupState::Found { matches } | LookupState::Selected { matches, .. } => matches,
            _ => &[],
        }
    }

    pub fn selected(&self) -> Option<&Member> {
        match self {
            LookupState::Selected { member, .. } => Some(member),
            _ => None,
        }
    }
}

/// Whether a verified membership entitles the holder to benefits today
pub fn is_valid_for_benefits(member: &Member) -> bool {
    member.status == MemberStatus::Active
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed;

    #[test]
    fn test_normalize_identifier() {
        assert_eq!(normalize_identifier("850101-10-5555"), "850101105555");
        assert_eq!(normalize_identifier(" M1 "), "m1");
        assert_eq!(normalize_identifier("--"), "");
    }

    #[test]
    fn test_find_all_memberships_across_clubs() {
        let members = seed::members();
        for q in ["850101-10-5555", "850101105555", " 850101 10 5555 "] {
            let found = find_all_memberships(&members, q);
            let ids: Vec<&str> = found.iter().map(|m| m.id.as_str()).collect();
            assert_eq!(ids, vec!["m1", "m5", "m6", "m7", "m8"], "query {q:?}");
        }
    }

    #[test]
    fn test_find_by_membership_id() {
        let members = seed::members();
        let found = find_all_memberships(&members, "M-10");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "m10");
    }

    #[test]
    fn test_find_ignores_blank_and_unknown() {
        let members = seed::members();
        assert!(find_all_memberships(&members, "").is_empty());
        assert!(find_all_memberships(&members, "---").is_empty());
        assert!(find_all_memberships(&members, "000000-00-0000").is_empty());
    }

    #[test]
    fn test_blank_search_stays_idle() {
        let members = seed::members();
        let mut state = LookupState::Found {
            matches: vec![members[0].clone()],
        };
        state.search(&members, "   ");
        assert_eq!(state, LookupState::Idle);
    }

    #[test]
    fn test_not_found_discloses_nothing() {
        let members = seed::members();
        let mut state = LookupState::default();
        state.search(&members, "999999-99-9999");
        assert_eq!(state, LookupState::NotFound);
        assert!(state.matches().is_empty());
        assert!(state.selected().is_none());
    }

    #[test]
    fn test_found_then_select() {
        let members = seed::members();
        let mut state = LookupState::default();
        state.search(&members, "031212060403");
        assert_eq!(state.matches().len(), 3);
        assert!(state.selected().is_none());

        let picked = state.select("m9").unwrap();
        assert_eq!(picked.club_id, "c2");
        assert_eq!(state.matches().len(), 3);
        assert_eq!(state.selected().map(|m| m.id.as_str()), Some("m9"));
    }

    #[test]
    fn test_select_outside_matches_keeps_state() {
        let members = seed::members();
        let mut state = LookupState::default();
        state.search(&members, "031212060403");
        state.select("m4").unwrap();

        let before = state.clone();
        assert!(state.select("m1").is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn test_new_search_resets_selection() {
        let members = seed::members();
        let mut state = LookupState::default();
        state.search(&members, "031212060403");
        state.select("m4").unwrap();
        state.search(&members, "850101-10-5555");
        assert!(state.selected().is_none());
        assert_eq!(state.matches().len(), 5);
    }

    #[test]
    fn test_select_from_idle_fails() {
        let mut state = LookupState::Idle;
        assert!(state.select("m1").is_err());
        assert_eq!(state, LookupState::Idle);
        state.reset();
        assert_eq!(state, LookupState::Idle);
    }

    #[test]
    fn test_state_serializes_with_tag() {
        let json = serde_json::to_value(LookupState::NotFound).unwrap();
        assert_eq!(json["state"], "not_found");
    }
}
