//! Program Enrollment Repository

use chrono::Local;
use shared::models::{
    EnrollmentApplicant, EnrollmentStatus, ProgramEnrollment,
};
use shared::{AppError, AppResult, ErrorCode};

use super::PortalStore;

fn insert(
    store: &PortalStore,
    partner_id: &str,
    program_id: &str,
    applicant: EnrollmentApplicant,
    status: EnrollmentStatus,
) -> AppResult<ProgramEnrollment> {
    let mut data = store.write();

    let partner = data
        .partners
        .iter()
        .find(|p| p.id == partner_id)
        .ok_or_else(|| AppError::partner_not_found(partner_id))?;
    if !partner.programs.iter().any(|p| p.id == program_id) {
        return Err(AppError::program_not_found(program_id));
    }

    let enrollment = ProgramEnrollment {
        id: data.next_id("pm"),
        partner_id: partner_id.to_string(),
        program_id: program_id.to_string(),
        full_name: applicant.full_name.trim().to_string(),
        ic_no: applicant.ic_no.trim().to_string(),
        email: applicant.email.trim().to_string(),
        phone: applicant.phone.trim().to_string(),
        address: applicant.address.trim().to_string(),
        age: applicant.age,
        join_date: Local::now().date_naive(),
        status,
    };

    data.enrollments.insert(0, enrollment.clone());
    Ok(enrollment)
}

/// Public sign-up through a program registration link; starts PENDING
pub fn register(
    store: &PortalStore,
    partner_id: &str,
    program_id: &str,
    applicant: EnrollmentApplicant,
) -> AppResult<ProgramEnrollment> {
    insert(store, partner_id, program_id, applicant, EnrollmentStatus::Pending)
}

/// Admin entry; the person is enrolled ACTIVE straight away
pub fn add_by_admin(
    store: &PortalStore,
    partner_id: &str,
    program_id: &str,
    applicant: EnrollmentApplicant,
) -> AppResult<ProgramEnrollment> {
    insert(store, partner_id, program_id, applicant, EnrollmentStatus::Active)
}

/// Enrollments of one partner, optionally filtered by name (case-insensitive) or IC
pub fn find_by_partner(
    store: &PortalStore,
    partner_id: &str,
    query: Option<&str>,
) -> Vec<ProgramEnrollment> {
    let query = query.map(str::trim).unwrap_or_default();
    let needle = query.to_lowercase();
    store
        .read()
        .enrollments
        .iter()
        .filter(|e| e.partner_id == partner_id)
        .filter(|e| {
            query.is_empty()
                || e.full_name.to_lowercase().contains(&needle)
                || e.ic_no.contains(query)
        })
        .cloned()
        .collect()
}

/// Move an enrollment along its allowed transitions
pub fn update_status(
    store: &PortalStore,
    partner_id: &str,
    id: &str,
    status: EnrollmentStatus,
) -> AppResult<ProgramEnrollment> {
    let mut data = store.write();
    let enrollment = data
        .enrollments
        .iter_mut()
        .find(|e| e.id == id && e.partner_id == partner_id)
        .ok_or_else(|| {
            AppError::new(ErrorCode::EnrollmentNotFound).with_detail("enrollment_id", id)
        })?;

    if !enrollment.status.can_transition_to(status) {
        return Err(AppError::with_message(
            ErrorCode::InvalidStatusTransition,
            format!("Cannot change status from {} to {}", enrollment.status, status),
        )
        .with_detail("from", enrollment.status.as_str())
        .with_detail("to", status.as_str()));
    }

    enrollment.status = status;
    Ok(enrollment.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::partner;

    fn person() -> EnrollmentApplicant {
        EnrollmentApplicant {
            full_name: "Nur Aisyah".into(),
            ic_no: "950303-03-3333".into(),
            email: "aisyah@example.my".into(),
            phone: "0135556666".into(),
            address: "Kuantan".into(),
            age: Some(29),
        }
    }

    #[test]
    fn test_public_registration_is_pending() {
        let store = PortalStore::seeded();
        let e = register(&store, "p1", "prog-1", person()).unwrap();
        assert_eq!(e.status, EnrollmentStatus::Pending);
        assert!(e.id.starts_with("pm"));
    }

    #[test]
    fn test_admin_add_is_active() {
        let store = PortalStore::seeded();
        let e = add_by_admin(&store, "p2", "prog-3", person()).unwrap();
        assert_eq!(e.status, EnrollmentStatus::Active);
    }

    #[test]
    fn test_program_must_belong_to_partner() {
        let store = PortalStore::seeded();
        let err = register(&store, "p2", "prog-1", person()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ProgramNotFound);
        let err = register(&store, "p9", "prog-1", person()).unwrap_err();
        assert_eq!(err.code, ErrorCode::PartnerNotFound);
    }

    #[test]
    fn test_find_and_update_status() {
        let store = PortalStore::seeded();
        let e = register(&store, "p1", "prog-2", person()).unwrap();
        assert_eq!(find_by_partner(&store, "p1", Some("aisyah")).len(), 1);
        assert_eq!(find_by_partner(&store, "p1", Some("950303")).len(), 1);
        assert!(find_by_partner(&store, "p2", None).is_empty());

        let updated = update_status(&store, "p1", &e.id, EnrollmentStatus::Rejected).unwrap();
        assert_eq!(updated.status, EnrollmentStatus::Rejected);

        let err = update_status(&store, "p2", &e.id, EnrollmentStatus::Active).unwrap_err();
        assert_eq!(err.code, ErrorCode::EnrollmentNotFound);
    }

    #[test]
    fn test_status_moves_follow_table() {
        let store = PortalStore::seeded();
        let e = add_by_admin(&store, "p1", "prog-1", person()).unwrap();

        let err = update_status(&store, "p1", &e.id, EnrollmentStatus::Pending).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStatusTransition);
        let err = update_status(&store, "p1", &e.id, EnrollmentStatus::Rejected).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStatusTransition);

        let e = update_status(&store, "p1", &e.id, EnrollmentStatus::Inactive).unwrap();
        let err = update_status(&store, "p1", &e.id, EnrollmentStatus::Rejected).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStatusTransition);
        let e = update_status(&store, "p1", &e.id, EnrollmentStatus::Active).unwrap();
        assert_eq!(e.status, EnrollmentStatus::Active);
        assert_eq!(find_by_partner(&store, "p1", None)[0].status, EnrollmentStatus::Active);
    }

    #[test]
    fn test_deleting_program_drops_enrollments() {
        let store = PortalStore::seeded();
        register(&store, "p1", "prog-1", person()).unwrap();
        register(&store, "p1", "prog-2", person()).unwrap();

        let (_, removed) = partner::delete_program(&store, "p1", "prog-1").unwrap();
        assert_eq!(removed, 1);
        let left = find_by_partner(&store, "p1", None);
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].program_id, "prog-2");
    }
}
