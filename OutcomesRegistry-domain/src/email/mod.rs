//! Outbound transactional email
//!
//! The [`EmailProvider`] trait is the seam between rendering/bookkeeping and
//! the HTTP call to the mail service. [`ResendEmailProvider`] is the
//! production implementation.

mod resend;
pub mod templates;

use async_trait::async_trait;
use thiserror::Error;

use crate::entities::email::EmailMessage;

pub use resend::ResendEmailProvider;

/// Default sender used when `EMAIL_FROM` is not set
pub const DEFAULT_FROM_ADDRESS: &str = "Clinic <noreply@example.com>";

/// Email errors
#[derive(Debug, Error)]
pub enum EmailError {
    /// Request failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing credentials or settings
    #[error("Email configuration error: {0}")]
    Configuration(String),

    /// The provider answered with an error
    #[error("Email provider error: {0}")]
    Provider(String),

    /// An email body could not be rendered
    #[error("Email template error: {0}")]
    Template(String),

    /// The provider could not be reached
    #[error("Email transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for EmailError {
    fn from(err: reqwest::Error) -> Self {
        EmailError::Transport(err.to_string())
    }
}

/// Something that can deliver a rendered message
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Send the message, returning the provider's message id
    async fn send(&self, message: &EmailMessage) -> Result<String, EmailError>;
}

/// Sender address from `EMAIL_FROM`, read at call time
pub fn from_address_from_env() -> String {
    std::env::var("EMAIL_FROM")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string())
}
