//! Usage Log Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Benefit type recorded when the partner leaves it blank
pub const DEFAULT_BENEFIT_TYPE: &str = "General Visit";
/// Location recorded when the partner leaves it blank
pub const DEFAULT_LOCATION: &str = "Partner Location";

/// Record that a member redeemed a benefit at a partner location (append-only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageLog {
    pub id: String,
    pub member_id: String,
    pub partner_id: String,
    pub timestamp: DateTime<Utc>,
    pub benefit_type: String,
    pub location: String,
}

/// Log a visit payload (partner id comes from the session)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageLogCreate {
    pub member_id: String,
    #[serde(default)]
    pub benefit_type: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}
