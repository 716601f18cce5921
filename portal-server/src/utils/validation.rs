//! Input validation helpers
//!
//! Centralized text length constants and validation functions used by the
//! handlers before anything reaches the store.

use shared::AppError;
use shared::models::{EnrollmentApplicant, MemberCreate};
use validator::ValidateEmail;

// ── Text length limits ──────────────────────────────────────────────

/// Person, club, company and program names
pub const MAX_NAME_LEN: usize = 200;

/// Short identifiers: phone, IC number, club code, state, benefit lines
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Descriptions and postal addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

/// Accepted age range on registration
pub const MIN_AGE: u32 = 1;
pub const MAX_AGE: u32 = 120;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty"))
            .with_detail("field", field));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Required, length-limited and syntactically valid email
pub fn validate_email(value: &str, field: &str) -> Result<(), AppError> {
    validate_required_text(value, field, MAX_EMAIL_LEN)?;
    if !value.trim().validate_email() {
        return Err(AppError::validation(format!("{field} is not a valid email address"))
            .with_detail("field", field));
    }
    Ok(())
}

/// Email that may be left blank, but must be valid when given
pub fn validate_optional_email(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    validate_email(value, field)
}

pub fn validate_age(age: u32) -> Result<(), AppError> {
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(AppError::with_message(
            shared::ErrorCode::ValueOutOfRange,
            format!("age must be between {MIN_AGE} and {MAX_AGE}"),
        )
        .with_detail("field", "age"));
    }
    Ok(())
}

/// Validate every entry of a benefit/term/offer list
pub fn validate_list(items: &[String], field: &str) -> Result<(), AppError> {
    for item in items {
        if item.len() > MAX_SHORT_TEXT_LEN * 2 {
            return Err(AppError::validation(format!(
                "{field} entry is too long ({} chars, max {})",
                item.len(),
                MAX_SHORT_TEXT_LEN * 2
            ))
            .with_detail("field", field));
        }
    }
    Ok(())
}

/// Trim every entry and drop the blank ones
pub fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

// ── Payload validators ──────────────────────────────────────────────

/// Club membership application
pub fn validate_member_create(payload: &MemberCreate) -> Result<(), AppError> {
    validate_required_text(&payload.full_name, "full_name", MAX_NAME_LEN)?;
    validate_required_text(&payload.ic_no, "ic_no", MAX_SHORT_TEXT_LEN)?;
    validate_email(&payload.email, "email")?;
    validate_required_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_required_text(&payload.club_id, "club_id", MAX_SHORT_TEXT_LEN)?;
    validate_age(payload.age)?;
    validate_optional_text(&payload.profile_pic_url, "profile_pic_url", MAX_URL_LEN)?;
    validate_optional_text(&payload.staff_id_url, "staff_id_url", MAX_URL_LEN)?;
    Ok(())
}

/// Program applicant; only name and IC are mandatory
pub fn validate_applicant(applicant: &EnrollmentApplicant) -> Result<(), AppError> {
    validate_required_text(&applicant.full_name, "full_name", MAX_NAME_LEN)?;
    validate_required_text(&applicant.ic_no, "ic_no", MAX_SHORT_TEXT_LEN)?;
    validate_optional_email(&applicant.email, "email")?;
    if applicant.phone.len() > MAX_SHORT_TEXT_LEN {
        return Err(AppError::validation("phone is too long").with_detail("field", "phone"));
    }
    if applicant.address.len() > MAX_ADDRESS_LEN {
        return Err(AppError::validation("address is too long").with_detail("field", "address"));
    }
    if let Some(age) = applicant.age {
        validate_age(age)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Ali", "full_name", MAX_NAME_LEN).is_ok());
        let err = validate_required_text("   ", "full_name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(validate_required_text(&"x".repeat(201), "full_name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("ali@gmail.com", "email").is_ok());
        assert!(validate_email("ali-at-gmail", "email").is_err());
        assert!(validate_optional_email("", "email").is_ok());
        assert!(validate_optional_email("nope", "email").is_err());
    }

    #[test]
    fn test_age_bounds() {
        assert!(validate_age(1).is_ok());
        assert!(validate_age(120).is_ok());
        assert_eq!(validate_age(0).unwrap_err().code, ErrorCode::ValueOutOfRange);
        assert!(validate_age(121).is_err());
    }

    #[test]
    fn test_clean_list_drops_blanks() {
        let cleaned = clean_list(vec![
            " Gym Percuma ".into(),
            "".into(),
            "   ".into(),
            "Kafeteria Subsidi".into(),
        ]);
        assert_eq!(cleaned, vec!["Gym Percuma", "Kafeteria Subsidi"]);
    }

    fn application() -> MemberCreate {
        MemberCreate {
            full_name: "Siti Aminah".into(),
            ic_no: "900202-14-1234".into(),
            email: "siti@example.my".into(),
            phone: "0198765432".into(),
            address: "Jalan Ampang, KL".into(),
            club_id: "c1".into(),
            age: 34,
            profile_pic_url: None,
            staff_id_url: None,
        }
    }

    #[test]
    fn test_member_create_rules() {
        assert!(validate_member_create(&application()).is_ok());

        let mut bad = application();
        bad.email = "siti-at-example".into();
        assert_eq!(
            validate_member_create(&bad).unwrap_err().details.unwrap()["field"],
            "email"
        );

        let mut bad = application();
        bad.age = 0;
        assert_eq!(
            validate_member_create(&bad).unwrap_err().code,
            ErrorCode::ValueOutOfRange
        );
    }

    #[test]
    fn test_applicant_optional_fields() {
        let applicant = EnrollmentApplicant {
            full_name: "Lim Wei".into(),
            ic_no: "880808-08-8888".into(),
            ..Default::default()
        };
        assert!(validate_applicant(&applicant).is_ok());

        let bad = EnrollmentApplicant {
            email: "nope".into(),
            ..applicant.clone()
        };
        assert!(validate_applicant(&bad).is_err());

        let missing_ic = EnrollmentApplicant {
            ic_no: " ".into(),
            ..applicant
        };
        assert!(validate_applicant(&missing_ic).is_err());
    }
}
