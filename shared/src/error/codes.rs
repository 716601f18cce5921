//! Unified error codes for the membership portal
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 6xxx: Club / partner / program errors
//! - 7xxx: Upload errors
//! - 8xxx: Member errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Serialized as a plain `u16` so the frontend can switch on numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,
    /// Record belongs to another club
    ClubScopeViolation = 2004,

    // ==================== 6xxx: Club / Partner ====================
    /// Club not found
    ClubNotFound = 6001,
    /// Club still has members
    ClubHasMembers = 6002,
    /// Club code already in use
    ClubCodeExists = 6003,
    /// Partner company not found
    PartnerNotFound = 6101,
    /// Partner program not found
    ProgramNotFound = 6201,
    /// Program name is required
    ProgramNameRequired = 6202,
    /// Program enrollment not found
    EnrollmentNotFound = 6301,
    /// Registration link does not resolve
    RegistrationLinkInvalid = 6401,

    // ==================== 7xxx: Upload ====================
    /// Empty file provided
    EmptyFile = 7001,
    /// No filename provided
    NoFilename = 7002,
    /// Invalid file extension
    InvalidFileExtension = 7003,
    /// File too large
    FileTooLarge = 7004,
    /// Image could not be decoded or encoded
    ImageProcessingFailed = 7005,
    /// File could not be written
    FileStorageFailed = 7006,

    // ==================== 8xxx: Member ====================
    /// Member not found
    MemberNotFound = 8001,
    /// Identity already holds an open membership in this club
    MemberAlreadyRegistered = 8002,
    /// Status change not allowed from the current status
    InvalidStatusTransition = 8003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// An insight request is already running
    InsightInProgress = 9101,
    /// Card rendering failed
    CardRenderFailed = 9201,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RoleRequired => "Specific role is required",
            ErrorCode::ClubScopeViolation => "Record belongs to another club",

            // Club / Partner
            ErrorCode::ClubNotFound => "Club not found",
            ErrorCode::ClubHasMembers => "Club has registered members",
            ErrorCode::ClubCodeExists => "Club code already exists",
            ErrorCode::PartnerNotFound => "Partner not found",
            ErrorCode::ProgramNotFound => "Program not found",
            ErrorCode::ProgramNameRequired => "Program name is required",
            ErrorCode::EnrollmentNotFound => "Enrollment not found",
            ErrorCode::RegistrationLinkInvalid => "Link not found or expired",

            // Upload
            ErrorCode::EmptyFile => "Empty file provided",
            ErrorCode::NoFilename => "No filename provided",
            ErrorCode::InvalidFileExtension => "Invalid file extension",
            ErrorCode::FileTooLarge => "File too large",
            ErrorCode::ImageProcessingFailed => "Image processing failed",
            ErrorCode::FileStorageFailed => "File storage failed",

            // Member
            ErrorCode::MemberNotFound => "No record found",
            ErrorCode::MemberAlreadyRegistered => "Membership already exists for this club",
            ErrorCode::InvalidStatusTransition => "Status change is not allowed",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::InsightInProgress => "Insight generation already in progress",
            ErrorCode::CardRenderFailed => "Failed to generate card",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),
            2004 => Ok(ErrorCode::ClubScopeViolation),

            // Club / Partner
            6001 => Ok(ErrorCode::ClubNotFound),
            6002 => Ok(ErrorCode::ClubHasMembers),
            6003 => Ok(ErrorCode::ClubCodeExists),
            6101 => Ok(ErrorCode::PartnerNotFound),
            6201 => Ok(ErrorCode::ProgramNotFound),
            6202 => Ok(ErrorCode::ProgramNameRequired),
            6301 => Ok(ErrorCode::EnrollmentNotFound),
            6401 => Ok(ErrorCode::RegistrationLinkInvalid),

            // Upload
            7001 => Ok(ErrorCode::EmptyFile),
            7002 => Ok(ErrorCode::NoFilename),
            7003 => Ok(ErrorCode::InvalidFileExtension),
            7004 => Ok(ErrorCode::FileTooLarge),
            7005 => Ok(ErrorCode::ImageProcessingFailed),
            7006 => Ok(ErrorCode::FileStorageFailed),

            // Member
            8001 => Ok(ErrorCode::MemberNotFound),
            8002 => Ok(ErrorCode::MemberAlreadyRegistered),
            8003 => Ok(ErrorCode::InvalidStatusTransition),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9101 => Ok(ErrorCode::InsightInProgress),
            9201 => Ok(ErrorCode::CardRenderFailed),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::ClubNotFound.code(), 6001);
        assert_eq!(ErrorCode::MemberNotFound.code(), 8001);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_try_from_u16() {
        assert_eq!(ErrorCode::try_from(8003), Ok(ErrorCode::InvalidStatusTransition));
        assert_eq!(ErrorCode::try_from(6401), Ok(ErrorCode::RegistrationLinkInvalid));
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::ClubHasMembers).unwrap();
        assert_eq!(json, "6002");

        let code: ErrorCode = serde_json::from_str("8002").unwrap();
        assert_eq!(code, ErrorCode::MemberAlreadyRegistered);

        assert!(serde_json::from_str::<ErrorCode>("31337").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::ValidationFailed.to_string(), "E0002");
        assert_eq!(ErrorCode::MemberNotFound.to_string(), "E8001");
    }

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(ErrorCode::MemberNotFound.message(), "No record found");
        assert_eq!(
            ErrorCode::RegistrationLinkInvalid.message(),
            "Link not found or expired"
        );
        assert_eq!(ErrorCode::CardRenderFailed.message(), "Failed to generate card");
    }
}
