//! Permission Definitions
//!
//! Static role -> permission table and the navigation menu each role sees.

use shared::Role;
use shared::models::NavItem;

pub const MEMBERS_VIEW: &str = "members:view";
pub const MEMBERS_APPROVE: &str = "members:approve";
pub const REPORTS_VIEW: &str = "reports:view";
pub const USAGE_LOG: &str = "usage:log";
pub const USAGE_VIEW: &str = "usage:view";
/// Super permission, admin only
pub const ALL: &str = "all";

/// Every grantable permission
pub const ALL_PERMISSIONS: &[&str] = &[
    MEMBERS_VIEW,
    MEMBERS_APPROVE,
    REPORTS_VIEW,
    USAGE_LOG,
    USAGE_VIEW,
];

pub const ADMIN_PERMISSIONS: &[&str] = &[ALL];

/// Club committee: own club's members and reports
pub const AJK_PERMISSIONS: &[&str] = &[MEMBERS_VIEW, MEMBERS_APPROVE, REPORTS_VIEW];

/// Partner staff: verify and log visits
pub const PARTNER_PERMISSIONS: &[&str] = &[USAGE_LOG, USAGE_VIEW];

pub fn role_permissions(role: Role) -> Vec<String> {
    let perms: &[&str] = match role {
        Role::Admin => ADMIN_PERMISSIONS,
        Role::Ajk => AJK_PERMISSIONS,
        Role::Partner => PARTNER_PERMISSIONS,
        Role::Public => &[],
    };
    perms.iter().map(|s| s.to_string()).collect()
}

pub fn is_valid_permission(permission: &str) -> bool {
    ALL_PERMISSIONS.contains(&permission) || permission == ALL || permission.ends_with(":*")
}

fn item(label: &str, to: &str) -> NavItem {
    NavItem {
        label: label.to_string(),
        to: Some(to.to_string()),
        children: Vec::new(),
    }
}

/// Sidebar entries per role
pub fn nav_menu(role: Role) -> Vec<NavItem> {
    match role {
        Role::Admin => vec![
            item("Dashboard", "/dashboard"),
            item("Pengurusan Ahli", "/admin/members"),
            item("Pengurusan Kelab", "/admin/clubs"),
            NavItem {
                label: "Rakan Strategik".to_string(),
                to: Some("/admin/partners".to_string()),
                children: vec![item("Senarai Syarikat", "/admin/partners")],
            },
            item("Laporan", "/reports"),
        ],
        Role::Ajk => vec![
            item("Dashboard", "/dashboard"),
            item("Ahli Kelab", "/admin/members"),
            item("Laporan", "/reports"),
        ],
        Role::Partner => vec![
            item("Semakan Ahli", "/partner/verify"),
            item("Rekod Penggunaan", "/dashboard"),
        ],
        Role::Public => vec![
            item("Utama", "/"),
            item("Daftar Ahli", "/register"),
            item("Semak Keahlian", "/verify"),
        ],
    }
}
