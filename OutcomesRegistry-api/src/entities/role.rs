use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use outcomes_registry_domain::entities::RoleResolution;

/// Role lookup result consumed by the client after sign-in
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserRoleResponse {
    pub user_id: String,

    /// Highest-priority role, `null` when the user has none
    #[schema(example = "clinician")]
    pub role: Option<String>,

    /// All roles held, highest priority first
    pub roles: Vec<String>,

    pub is_admin: bool,
    pub is_clinician: bool,

    /// Where the client should navigate
    #[schema(example = "/dashboard")]
    pub redirect_to: String,

    pub display_name: Option<String>,
}

impl From<RoleResolution> for UserRoleResponse {
    fn from(resolution: RoleResolution) -> Self {
        Self {
            is_admin: resolution.is_admin(),
            is_clinician: resolution.is_clinician(),
            role: resolution.role.map(|r| r.as_str().to_string()),
            roles: resolution.roles.iter().map(|r| r.as_str().to_string()).collect(),
            user_id: resolution.user_id,
            redirect_to: resolution.redirect_to,
            display_name: resolution.display_name,
        }
    }
}

/// Request payload for granting a role
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssignRoleRequest {
    /// `admin`, `clinician`, `front_desk` or `patient`
    pub role: String,
}
