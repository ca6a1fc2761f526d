use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::database::DatabasePool;
use crate::models::notification::{NewNotificationRecord, NotificationRecord};
use super::errors::RepositoryError;
use super::in_memory::InMemoryStorage;
use super::resolve_pool;
use super::storage::DatabaseStorage;

/// Repository trait for the notification history log
#[async_trait]
pub trait NotificationRepositoryTrait: Send + Sync {
    /// Append an entry, stamping id and creation time
    async fn record(&self, new: NewNotificationRecord) -> Result<NotificationRecord, RepositoryError>;

    /// Entries sent to one address, newest first
    async fn list_for_recipient(&self, recipient_email: &str) -> Result<Vec<NotificationRecord>, RepositoryError>;
}

/// Notification history repository
#[derive(Debug, Clone, Default)]
pub struct NotificationRepository {
    pool: Option<DatabasePool>,
    storage: InMemoryStorage<NotificationRecord>,
}

impl NotificationRepository {
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
impl NotificationRepositoryTrait for NotificationRepository {
    async fn record(&self, new: NewNotificationRecord) -> Result<NotificationRecord, RepositoryError> {
        let record = NotificationRecord {
            id: Uuid::new_v4().to_string(),
            notification_type: new.notification_type,
            recipient_email: new.recipient_email,
            subject: new.subject,
            status: new.status,
            provider_message_id: new.provider_message_id,
            error_message: new.error_message,
            created_at: Utc::now().to_rfc3339(),
        };

        match resolve_pool(&self.pool) {
            Some(pool) => {
                DatabaseStorage::insert_notification(&pool, &record)?;
                Ok(record)
            },
            None => self.storage.insert(&record.id, record.clone()),
        }
    }

    async fn list_for_recipient(&self, recipient_email: &str) -> Result<Vec<NotificationRecord>, RepositoryError> {
        match resolve_pool(&self.pool) {
            Some(pool) => DatabaseStorage::list_notifications_for_recipient(&pool, recipient_email),
            None => {
                let mut records = self.storage.filter(|r| r.recipient_email == recipient_email)?;
                records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                Ok(records)
            }
        }
    }
}
