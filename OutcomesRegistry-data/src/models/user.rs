use serde::{Deserialize, Serialize};

/// Storage model for a row of `user_roles`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRoleRecord {
    pub id: String,
    pub user_id: String,
    /// Role name as stored (`admin`, `clinician`, `front_desk`, `patient`)
    pub role: String,
    pub created_at: String,
}

/// Storage model for a row of `profiles`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Same identifier as the auth user
    pub id: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub clinic_name: Option<String>,
    pub created_at: String,
}
