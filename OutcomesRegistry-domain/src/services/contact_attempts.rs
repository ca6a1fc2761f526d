use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tracing::{error, info};
use validator::Validate;

use outcomes_registry_data::models::contact_attempt::NewContactAttempt;
use outcomes_registry_data::repository::{ContactAttemptRepository, ContactAttemptRepositoryTrait, RepositoryError};

use crate::entities::contact::{ContactAttempt, RecordContactAttempt};
use crate::entities::conversions::convert_to_domain_contact_attempt;
use crate::services::validation_message;

/// Contact attempt errors
#[derive(Debug, Error)]
pub enum ContactAttemptError {
    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Repository error
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<RepositoryError> for ContactAttemptError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Validation(msg) => ContactAttemptError::ValidationError(msg),
            other => ContactAttemptError::RepositoryError(other.to_string()),
        }
    }
}

/// Trait for the lead contact log
#[async_trait]
pub trait ContactAttemptServiceTrait: Send + Sync {
    /// Log an attempt to reach a lead
    async fn record(&self, lead_id: &str, request: RecordContactAttempt) -> Result<ContactAttempt, ContactAttemptError>;

    /// Attempts for a lead, newest first
    async fn list(&self, lead_id: &str) -> Result<Vec<ContactAttempt>, ContactAttemptError>;
}

/// Contact attempt service for domain logic
pub struct ContactAttemptService<R: ContactAttemptRepositoryTrait> {
    repository: R,
}

impl<R: ContactAttemptRepositoryTrait> ContactAttemptService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: ContactAttemptRepositoryTrait> ContactAttemptServiceTrait for ContactAttemptService<R> {
    async fn record(&self, lead_id: &str, request: RecordContactAttempt) -> Result<ContactAttempt, ContactAttemptError> {
        let lead_id = lead_id.trim();
        if lead_id.is_empty() {
            return Err(ContactAttemptError::ValidationError("lead id is required".to_string()));
        }
        request
            .validate()
            .map_err(|e| ContactAttemptError::ValidationError(validation_message(&e)))?;

        let new = NewContactAttempt {
            lead_id: lead_id.to_string(),
            method: request.method.as_str().to_string(),
            outcome: request.outcome.as_str().to_string(),
            notes: request.notes.filter(|n| !n.trim().is_empty()),
            attempted_by: request.attempted_by,
            attempted_at: Utc::now().to_rfc3339(),
        };

        let row = self.repository.create(new).await?;
        info!("Logged {} contact attempt for lead {}", row.method, row.lead_id);
        convert_to_domain_contact_attempt(row).map_err(ContactAttemptError::RepositoryError)
    }

    async fn list(&self, lead_id: &str) -> Result<Vec<ContactAttempt>, ContactAttemptError> {
        let rows = self.repository.list_for_lead(lead_id.trim()).await?;

        rows.into_iter()
            .map(|row| {
                convert_to_domain_contact_attempt(row).map_err(|e| {
                    error!("Stored contact attempt is unreadable: {}", e);
                    ContactAttemptError::RepositoryError(e)
                })
            })
            .collect()
    }
}

/// Contact attempt service over the default repository
pub fn create_default_contact_attempt_service() -> ContactAttemptService<ContactAttemptRepository> {
    ContactAttemptService::new(ContactAttemptRepository::new())
}
