//! Club Model

use serde::{Deserialize, Serialize};

/// Club entity (internal association chapter)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Club {
    pub id: String,
    pub name: String,
    pub code: String,
    /// Person in charge
    pub pic_name: String,
    pub pic_phone: String,
    pub email: String,
    pub state: String,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub terms: Vec<String>,
}

/// Create club payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubCreate {
    pub name: String,
    pub code: String,
    pub pic_name: String,
    pub pic_phone: String,
    pub email: String,
    pub state: String,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub terms: Vec<String>,
}

/// Replace benefit/term lists payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubBenefitsUpdate {
    pub benefits: Vec<String>,
    pub terms: Vec<String>,
}

/// Public projection used by the registration form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubSummary {
    pub id: String,
    pub name: String,
    pub code: String,
    pub state: String,
    pub benefits: Vec<String>,
    pub terms: Vec<String>,
}

impl From<&Club> for ClubSummary {
    fn from(club: &Club) -> Self {
        Self {
            id: club.id.clone(),
            name: club.name.clone(),
            code: club.code.clone(),
            state: club.state.clone(),
            benefits: club.benefits.clone(),
            terms: club.terms.clone(),
        }
    }
}
