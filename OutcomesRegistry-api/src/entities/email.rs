use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use outcomes_registry_domain::entities::email::{ApprovalEmailRequest, DeclineEmailRequest};

/// Request payload for telling a lead they were accepted
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SendApprovalEmailRequest {
    /// Lead's email address
    pub email: String,

    /// Lead's name as it should appear in the greeting
    pub name: String,

    /// Overrides the clinic name from clinic settings
    pub clinic_name: Option<String>,

    /// Free text about the first appointment
    pub appointment_details: Option<String>,
}

/// Request payload for telling a lead they were not accepted
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SendDeclineEmailRequest {
    pub email: String,
    pub name: String,
    pub clinic_name: Option<String>,
    /// Optional explanation included in the body
    pub reason: Option<String>,
}

/// Successful send
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendEmailResponse {
    pub success: bool,
    /// Provider message id
    pub id: String,
}

impl From<SendApprovalEmailRequest> for ApprovalEmailRequest {
    fn from(request: SendApprovalEmailRequest) -> Self {
        Self {
            email: request.email.trim().to_string(),
            name: request.name.trim().to_string(),
            clinic_name: request.clinic_name,
            appointment_details: request.appointment_details,
        }
    }
}

impl From<SendDeclineEmailRequest> for DeclineEmailRequest {
    fn from(request: SendDeclineEmailRequest) -> Self {
        Self {
            email: request.email.trim().to_string(),
            name: request.name.trim().to_string(),
            clinic_name: request.clinic_name,
            reason: request.reason,
        }
    }
}
