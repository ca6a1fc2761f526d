use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Application roles stored in `user_roles`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppRole {
    Admin,
    Clinician,
    FrontDesk,
    Patient,
}

impl AppRole {
    /// Lower is more privileged
    pub fn priority(&self) -> u8 {
        match self {
            AppRole::Admin => 0,
            AppRole::Clinician => 1,
            AppRole::FrontDesk => 2,
            AppRole::Patient => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AppRole::Admin => "admin",
            AppRole::Clinician => "clinician",
            AppRole::FrontDesk => "front_desk",
            AppRole::Patient => "patient",
        }
    }
}

impl fmt::Display for AppRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(AppRole::Admin),
            "clinician" => Ok(AppRole::Clinician),
            "front_desk" | "frontdesk" => Ok(AppRole::FrontDesk),
            "patient" => Ok(AppRole::Patient),
            other => Err(format!("invalid role: {}", other)),
        }
    }
}

/// What the client needs after sign-in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleResolution {
    pub user_id: String,
    /// Highest-priority role held, if any
    pub role: Option<AppRole>,
    pub roles: Vec<AppRole>,
    pub display_name: Option<String>,
    pub redirect_to: String,
}

impl RoleResolution {
    pub fn is_admin(&self) -> bool {
        self.roles.contains(&AppRole::Admin)
    }

    /// Admins can do everything clinicians can
    pub fn is_clinician(&self) -> bool {
        self.roles.contains(&AppRole::Clinician) || self.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("Admin".parse::<AppRole>(), Ok(AppRole::Admin));
        assert_eq!(" front_desk ".parse::<AppRole>(), Ok(AppRole::FrontDesk));
        assert!("superuser".parse::<AppRole>().is_err());
    }

    #[test]
    fn test_priority_order() {
        assert!(AppRole::Admin.priority() < AppRole::Clinician.priority());
        assert!(AppRole::Clinician.priority() < AppRole::FrontDesk.priority());
        assert!(AppRole::FrontDesk.priority() < AppRole::Patient.priority());
    }
}
