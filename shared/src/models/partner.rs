//! Benefit Partner Model

use serde::{Deserialize, Serialize};

/// Partner-run membership tier with its own benefits/terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub terms: Vec<String>,
}

/// External company offering discount programs to members
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitPartner {
    pub id: String,
    pub company_name: String,
    pub description: String,
    /// Offer tags, e.g. "20% off rooms"
    #[serde(default)]
    pub offers: Vec<String>,
    pub location: String,
    #[serde(default)]
    pub programs: Vec<Program>,
}

/// Create partner payload
///
/// `program_names` seeds empty programs, one per non-blank name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerCreate {
    pub company_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub offers: Vec<String>,
    pub location: String,
    #[serde(default)]
    pub program_names: Vec<String>,
}

/// Partner settings update payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartnerUpdate {
    pub company_name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub offers: Option<Vec<String>>,
}

/// Create / replace program payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramUpsert {
    pub name: String,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub terms: Vec<String>,
}

/// Public view of a program registration link target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramRegistrationContext {
    pub partner_id: String,
    pub company_name: String,
    pub location: String,
    pub program: Program,
}
