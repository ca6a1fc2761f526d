use serde::{Deserialize, Serialize};

/// Storage model for a row of `contact_attempts`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactAttempt {
    pub id: String,
    pub lead_id: String,
    pub method: String,
    pub outcome: String,
    pub notes: Option<String>,
    pub attempted_by: Option<String>,
    pub attempted_at: String,
}

/// Input data for recording a contact attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContactAttempt {
    pub lead_id: String,
    pub method: String,
    pub outcome: String,
    pub notes: Option<String>,
    pub attempted_by: Option<String>,
    pub attempted_at: String,
}
