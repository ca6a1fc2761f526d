use async_trait::async_trait;
use uuid::Uuid;

use crate::database::DatabasePool;
use crate::models::contact_attempt::{ContactAttempt, NewContactAttempt};
use super::errors::RepositoryError;
use super::in_memory::InMemoryStorage;
use super::resolve_pool;
use super::storage::DatabaseStorage;

/// Repository trait for lead contact attempts
#[async_trait]
pub trait ContactAttemptRepositoryTrait: Send + Sync {
    async fn create(&self, new: NewContactAttempt) -> Result<ContactAttempt, RepositoryError>;

    /// Attempts for one lead, newest first
    async fn list_for_lead(&self, lead_id: &str) -> Result<Vec<ContactAttempt>, RepositoryError>;
}

/// Contact attempt repository
#[derive(Debug, Clone, Default)]
pub struct ContactAttemptRepository {
    pool: Option<DatabasePool>,
    storage: InMemoryStorage<ContactAttempt>,
}

impl ContactAttemptRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pool(pool: DatabasePool) -> Self {
        Self {
            pool: Some(pool),
            storage: InMemoryStorage::new(),
        }
    }
}

#[async_trait]
impl ContactAttemptRepositoryTrait for ContactAttemptRepository {
    async fn create(&self, new: NewContactAttempt) -> Result<ContactAttempt, RepositoryError> {
        let attempt = ContactAttempt {
            id: Uuid::new_v4().to_string(),
            lead_id: new.lead_id,
            method: new.method,
            outcome: new.outcome,
            notes: new.notes,
            attempted_by: new.attempted_by,
            attempted_at: new.attempted_at,
        };

        match resolve_pool(&self.pool) {
            Some(pool) => {
                DatabaseStorage::insert_contact_attempt(&pool, &attempt)?;
                Ok(attempt)
            },
            None => self.storage.insert(&attempt.id, attempt.clone()),
        }
    }

    async fn list_for_lead(&self, lead_id: &str) -> Result<Vec<ContactAttempt>, RepositoryError> {
        match resolve_pool(&self.pool) {
            Some(pool) => DatabaseStorage::list_contact_attempts(&pool, lead_id),
            None => {
                let mut attempts = self.storage.filter(|a| a.lead_id == lead_id)?;
                attempts.sort_by(|a, b| b.attempted_at.cmp(&a.attempted_at));
                Ok(attempts)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(lead_id: &str, at: &str) -> NewContactAttempt {
        NewContactAttempt {
            lead_id: lead_id.to_string(),
            method: "phone".to_string(),
            outcome: "no_answer".to_string(),
            notes: None,
            attempted_by: Some("front-desk-1".to_string()),
            attempted_at: at.to_string(),
        }
    }

    async fn exercise(repo: ContactAttemptRepository) {
        repo.create(attempt("lead-1", "2024-05-01T09:00:00+00:00")).await.unwrap();
        repo.create(attempt("lead-1", "2024-05-02T09:00:00+00:00")).await.unwrap();
        repo.create(attempt("lead-2", "2024-05-03T09:00:00+00:00")).await.unwrap();

        let attempts = repo.list_for_lead("lead-1").await.unwrap();
        assert_eq!(attempts.len(), 2);
        assert_eq!(attempts[0].attempted_at, "2024-05-02T09:00:00+00:00");
    }

    #[tokio::test]
    async fn test_contact_attempts_in_memory() {
        exercise(ContactAttemptRepository::new()).await;
    }

    #[tokio::test]
    async fn test_contact_attempts_sqlite() {
        exercise(ContactAttemptRepository::with_pool(DatabasePool::in_memory().unwrap())).await;
    }
}
