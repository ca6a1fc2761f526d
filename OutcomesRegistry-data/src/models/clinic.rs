use serde::{Deserialize, Serialize};

/// Storage model for a row of `clinic_settings`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicSettings {
    pub id: String,
    pub clinic_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    /// Last modification time (RFC 3339); the newest row is the current one
    pub updated_at: String,
}
