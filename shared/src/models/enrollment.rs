//! Program Enrollment Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a member inside a partner program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentStatus {
    Active,
    Inactive,
    Pending,
    Rejected,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Active => "ACTIVE",
            EnrollmentStatus::Inactive => "INACTIVE",
            EnrollmentStatus::Pending => "PENDING",
            EnrollmentStatus::Rejected => "REJECTED",
        }
    }

    /// Allowed moves.
    ///
    /// PENDING -> ACTIVE | REJECTED, ACTIVE -> INACTIVE, INACTIVE | REJECTED -> ACTIVE.
    pub fn can_transition_to(self, next: EnrollmentStatus) -> bool {
        matches!(
            (self, next),
            (EnrollmentStatus::Pending, EnrollmentStatus::Active)
                | (EnrollmentStatus::Pending, EnrollmentStatus::Rejected)
                | (EnrollmentStatus::Active, EnrollmentStatus::Inactive)
                | (EnrollmentStatus::Inactive, EnrollmentStatus::Active)
                | (EnrollmentStatus::Rejected, EnrollmentStatus::Active)
        )
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A person registered into a partner's program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramEnrollment {
    pub id: String,
    pub partner_id: String,
    pub program_id: String,
    pub full_name: String,
    pub ic_no: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub age: Option<u32>,
    pub join_date: NaiveDate,
    pub status: EnrollmentStatus,
}

/// Applicant details, shared by public registration and admin entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnrollmentApplicant {
    pub full_name: String,
    pub ic_no: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub age: Option<u32>,
}

/// Admin "add member to program" payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentCreate {
    pub program_id: String,
    #[serde(flatten)]
    pub applicant: EnrollmentApplicant,
}

/// Enrollment status change payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentStatusUpdate {
    pub status: EnrollmentStatus,
}
