use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use outcomes_registry_domain::entities::contact::{
    ContactAttempt, ContactMethod, ContactOutcome, RecordContactAttempt,
};

/// Request payload for logging a contact attempt
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateContactAttemptRequest {
    /// `phone`, `email`, `sms` or `voicemail`
    #[schema(example = "phone")]
    pub method: String,

    /// `reached`, `no_answer`, `left_message`, `wrong_number` or `scheduled`
    #[schema(example = "left_message")]
    pub outcome: String,

    pub notes: Option<String>,

    /// Staff member who made the attempt
    pub attempted_by: Option<String>,
}

impl TryFrom<CreateContactAttemptRequest> for RecordContactAttempt {
    type Error = String;

    fn try_from(request: CreateContactAttemptRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            method: request.method.trim().parse::<ContactMethod>()?,
            outcome: request.outcome.trim().parse::<ContactOutcome>()?,
            notes: request.notes,
            attempted_by: request.attempted_by,
        })
    }
}

/// Public representation of a contact attempt
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContactAttemptResponse {
    pub id: String,
    pub lead_id: String,
    pub method: String,
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempted_by: Option<String>,
    pub attempted_at: DateTime<Utc>,
}

impl From<ContactAttempt> for ContactAttemptResponse {
    fn from(attempt: ContactAttempt) -> Self {
        Self {
            id: attempt.id,
            lead_id: attempt.lead_id,
            method: attempt.method.as_str().to_string(),
            outcome: attempt.outcome.as_str().to_string(),
            notes: attempt.notes,
            attempted_by: attempt.attempted_by,
            attempted_at: attempt.attempted_at,
        }
    }
}
