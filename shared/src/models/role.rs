//! Role Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Portal role
///
/// The portal has no user accounts; a session simply carries one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Admin Sistem
    Admin,
    /// AJK Kelab (club committee member)
    Ajk,
    /// Syarikat Penyedia Manfaat (benefit partner staff)
    Partner,
    /// Awam / Ahli (public visitor or member)
    Public,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Ajk, Role::Partner, Role::Public];

    /// Stable identifier used in tokens and URLs
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Ajk => "AJK",
            Role::Partner => "PARTNER",
            Role::Public => "PUBLIC",
        }
    }

    /// Label shown in the portal UI
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Admin => "Admin Sistem",
            Role::Ajk => "AJK Kelab",
            Role::Partner => "Syarikat Penyedia Manfaat",
            Role::Public => "Awam / Ahli",
        }
    }

    pub fn is_staff(&self) -> bool {
        !matches!(self, Role::Public)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown role: {}", s))
    }
}

/// Navigation entry for a role's sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}
