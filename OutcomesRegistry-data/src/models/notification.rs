use serde::{Deserialize, Serialize};

/// Storage model for a row of `notifications_history`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub id: String,

    /// Kind of message, e.g. `approval` or `decline`
    pub notification_type: String,

    pub recipient_email: String,
    pub subject: String,

    /// `sent` or `failed`
    pub status: String,

    /// Identifier returned by the email provider on success
    pub provider_message_id: Option<String>,

    /// Provider error text on failure
    pub error_message: Option<String>,

    pub created_at: String,
}

/// Input data for a history entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNotificationRecord {
    pub notification_type: String,
    pub recipient_email: String,
    pub subject: String,
    pub status: String,
    pub provider_message_id: Option<String>,
    pub error_message: Option<String>,
}
