use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use validator::Validate;

/// Channel used to reach a lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactMethod {
    Phone,
    Email,
    Sms,
    Voicemail,
}

/// What happened on the attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactOutcome {
    Reached,
    NoAnswer,
    LeftMessage,
    WrongNumber,
    Scheduled,
}

impl ContactMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactMethod::Phone => "phone",
            ContactMethod::Email => "email",
            ContactMethod::Sms => "sms",
            ContactMethod::Voicemail => "voicemail",
        }
    }
}

impl FromStr for ContactMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "phone" => Ok(ContactMethod::Phone),
            "email" => Ok(ContactMethod::Email),
            "sms" => Ok(ContactMethod::Sms),
            "voicemail" => Ok(ContactMethod::Voicemail),
            other => Err(format!("invalid contact method: {}", other)),
        }
    }
}

impl ContactOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactOutcome::Reached => "reached",
            ContactOutcome::NoAnswer => "no_answer",
            ContactOutcome::LeftMessage => "left_message",
            ContactOutcome::WrongNumber => "wrong_number",
            ContactOutcome::Scheduled => "scheduled",
        }
    }
}

impl FromStr for ContactOutcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reached" => Ok(ContactOutcome::Reached),
            "no_answer" => Ok(ContactOutcome::NoAnswer),
            "left_message" => Ok(ContactOutcome::LeftMessage),
            "wrong_number" => Ok(ContactOutcome::WrongNumber),
            "scheduled" => Ok(ContactOutcome::Scheduled),
            other => Err(format!("invalid contact outcome: {}", other)),
        }
    }
}

/// A logged attempt to reach an intake lead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactAttempt {
    pub id: String,
    pub lead_id: String,
    pub method: ContactMethod,
    pub outcome: ContactOutcome,
    pub notes: Option<String>,
    pub attempted_by: Option<String>,
    pub attempted_at: DateTime<Utc>,
}

/// Input for logging an attempt
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordContactAttempt {
    pub method: ContactMethod,
    pub outcome: ContactOutcome,

    #[validate(length(max = 2000, message = "Notes cannot exceed 2000 characters"))]
    pub notes: Option<String>,

    pub attempted_by: Option<String>,
}
