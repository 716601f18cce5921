//! Member Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Membership lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberStatus {
    Pending,
    Active,
    Rejected,
    Expired,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Pending => "PENDING",
            MemberStatus::Active => "ACTIVE",
            MemberStatus::Rejected => "REJECTED",
            MemberStatus::Expired => "EXPIRED",
        }
    }

    /// Allowed lifecycle moves.
    ///
    /// PENDING -> ACTIVE | REJECTED, ACTIVE -> EXPIRED. REJECTED and EXPIRED are terminal.
    pub fn can_transition_to(self, next: MemberStatus) -> bool {
        matches!(
            (self, next),
            (MemberStatus::Pending, MemberStatus::Active)
                | (MemberStatus::Pending, MemberStatus::Rejected)
                | (MemberStatus::Active, MemberStatus::Expired)
        )
    }

    /// Whether the membership still occupies the identity's slot in its club
    pub fn is_open(self) -> bool {
        matches!(self, MemberStatus::Pending | MemberStatus::Active)
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Member entity (one person's registration in one club)
///
/// One person may hold several of these, all sharing the same `ic_no`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub full_name: String,
    /// National identity card number, stored as entered
    pub ic_no: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub club_id: String,
    pub status: MemberStatus,
    pub applied_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_date: Option<NaiveDate>,
    pub profile_pic_url: String,
    pub staff_id_url: String,
    pub age: u32,
}

/// Public registration payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberCreate {
    pub full_name: String,
    pub ic_no: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub club_id: String,
    pub age: u32,
    #[serde(default)]
    pub profile_pic_url: Option<String>,
    #[serde(default)]
    pub staff_id_url: Option<String>,
}

/// Status change payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberStatusUpdate {
    pub status: MemberStatus,
}

/// Member with club info (for list/detail views)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberWithClub {
    #[serde(flatten)]
    pub member: Member,
    pub club_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_transitions() {
        assert!(MemberStatus::Pending.can_transition_to(MemberStatus::Active));
        assert!(MemberStatus::Pending.can_transition_to(MemberStatus::Rejected));
        assert!(!MemberStatus::Pending.can_transition_to(MemberStatus::Expired));
        assert!(!MemberStatus::Pending.can_transition_to(MemberStatus::Pending));
    }

    #[test]
    fn test_terminal_statuses() {
        for next in [
            MemberStatus::Pending,
            MemberStatus::Active,
            MemberStatus::Rejected,
            MemberStatus::Expired,
        ] {
            assert!(!MemberStatus::Expired.can_transition_to(next));
            assert!(!MemberStatus::Rejected.can_transition_to(next));
        }
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&MemberStatus::Expired).unwrap(),
            "\"EXPIRED\""
        );
        let status: MemberStatus = serde_json::from_str("\"ACTIVE\"").unwrap();
        assert_eq!(status, MemberStatus::Active);
        assert!(serde_json::from_str::<MemberStatus>("\"SUSPENDED\"").is_err());
    }
}
