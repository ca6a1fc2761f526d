use serde::{Deserialize, Serialize};
use std::fmt;
use validator::{Validate, ValidationError};

/// Transactional email kinds sent to intake leads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailKind {
    Approval,
    Decline,
}

impl EmailKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailKind::Approval => "approval",
            EmailKind::Decline => "decline",
        }
    }
}

impl fmt::Display for EmailKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reject names that are empty once trimmed
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Name is required".into());
        return Err(err);
    }
    Ok(())
}

/// Lead accepted for care
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApprovalEmailRequest {
    #[validate(email(message = "Must be a valid email address"))]
    pub email: String,

    #[validate(length(max = 200, message = "Name cannot exceed 200 characters"), custom = "not_blank")]
    pub name: String,

    pub clinic_name: Option<String>,

    /// Free text describing the first appointment
    #[validate(length(max = 2000, message = "Appointment details cannot exceed 2000 characters"))]
    pub appointment_details: Option<String>,
}

/// Lead not accepted for care
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DeclineEmailRequest {
    #[validate(email(message = "Must be a valid email address"))]
    pub email: String,

    #[validate(length(max = 200, message = "Name cannot exceed 200 characters"), custom = "not_blank")]
    pub name: String,

    pub clinic_name: Option<String>,

    #[validate(length(max = 2000, message = "Reason cannot exceed 2000 characters"))]
    pub reason: Option<String>,
}

/// Clinic identity printed in email bodies
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClinicContact {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Default for ClinicContact {
    fn default() -> Self {
        Self {
            name: "our clinic".to_string(),
            phone: None,
            email: None,
        }
    }
}

/// Fully rendered message handed to the email provider
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Provider acknowledgement of a sent message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentEmail {
    pub id: String,
}
