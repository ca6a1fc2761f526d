use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::database::DatabasePool;
use crate::models::delivery::{ComparisonReportDelivery, DeliveryEngagement, NewComparisonReportDelivery};
use super::errors::RepositoryError;
use super::in_memory::InMemoryStorage;
use super::resolve_pool;
use super::storage::DatabaseStorage;

/// Repository trait for comparison report deliveries
#[async_trait]
pub trait DeliveryRepositoryTrait: Send + Sync {
    /// Create a delivery row with zeroed engagement counters
    async fn create(&self, new: NewComparisonReportDelivery) -> Result<ComparisonReportDelivery, RepositoryError>;

    /// Look up a delivery by its tracking identifier
    async fn get_by_tracking_id(&self, tracking_id: &str) -> Result<Option<ComparisonReportDelivery>, RepositoryError>;

    /// Overwrite the engagement counters of the delivery with this primary key
    async fn update_engagement(&self, id: &str, engagement: &DeliveryEngagement) -> Result<(), RepositoryError>;
}

/// Delivery repository backed by SQLite, or memory when no pool exists
#[derive(Debug, Clone, Default)]
pub struct DeliveryRepository {
    pool: Option<DatabasePool>,
    storage: InMemoryStorage<ComparisonReportDelivery>,
}

impl DeliveryRepository {
    /// Create a repository that uses the global pool when available
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository bound to a specific pool
    pub fn with_pool(pool: DatabasePool) -> Self {
        Self {
            pool: Some(pool),
            storage: InMemoryStorage::new(),
        }
    }
}

#[async_trait]
impl DeliveryRepositoryTrait for DeliveryRepository {
    async fn create(&self, new: NewComparisonReportDelivery) -> Result<ComparisonReportDelivery, RepositoryError> {
        let delivery = ComparisonReportDelivery::from_new(Uuid::new_v4().to_string(), new);

        match resolve_pool(&self.pool) {
            Some(pool) => {
                DatabaseStorage::insert_delivery(&pool, &delivery)?;
                Ok(delivery)
            },
            None => {
                debug!("Database not available, storing delivery {} in memory", delivery.id);
                let tracking_id = delivery.tracking_id.clone();
                if self.storage.find(|d| d.tracking_id == tracking_id)?.is_some() {
                    return Err(RepositoryError::Conflict("tracking id already exists".to_string()));
                }
                self.storage.insert(&delivery.id, delivery.clone())
            }
        }
    }

    async fn get_by_tracking_id(&self, tracking_id: &str) -> Result<Option<ComparisonReportDelivery>, RepositoryError> {
        match resolve_pool(&self.pool) {
            Some(pool) => DatabaseStorage::get_delivery_by_tracking_id(&pool, tracking_id),
            None => self.storage.find(|d| d.tracking_id == tracking_id),
        }
    }

    async fn update_engagement(&self, id: &str, engagement: &DeliveryEngagement) -> Result<(), RepositoryError> {
        match resolve_pool(&self.pool) {
            Some(pool) => DatabaseStorage::update_delivery_engagement(&pool, id, engagement),
            None => self
                .storage
                .update(id, |d| d.apply_engagement(engagement))
                .map(|_| ()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_delivery(tracking_id: &str) -> NewComparisonReportDelivery {
        NewComparisonReportDelivery {
            tracking_id: tracking_id.to_string(),
            episode_id: Some("episode-1".to_string()),
            recipient_email: "pcp@example.com".to_string(),
            recipient_name: Some("Dr. Rivera".to_string()),
            sent_at: "2024-03-01T10:00:00+00:00".to_string(),
        }
    }

    fn engagement_after_one_open() -> DeliveryEngagement {
        DeliveryEngagement {
            open_count: 1,
            first_opened_at: Some("2024-03-02T09:00:00+00:00".to_string()),
            last_opened_at: Some("2024-03-02T09:00:00+00:00".to_string()),
            click_count: 0,
            first_clicked_at: None,
            last_clicked_at: None,
        }
    }

    async fn exercise(repo: DeliveryRepository) {
        let created = repo.create(new_delivery("trk-1")).await.unwrap();
        assert_eq!(created.open_count, 0);

        let found = repo.get_by_tracking_id("trk-1").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert!(repo.get_by_tracking_id("nope").await.unwrap().is_none());

        repo.update_engagement(&created.id, &engagement_after_one_open()).await.unwrap();
        let updated = repo.get_by_tracking_id("trk-1").await.unwrap().unwrap();
        assert_eq!(updated.open_count, 1);
        assert!(updated.first_opened_at.is_some());

        let missing = repo.update_engagement("missing-id", &engagement_after_one_open()).await;
        assert!(matches!(missing, Err(RepositoryError::NotFound(_))));

        let duplicate = repo.create(new_delivery("trk-1")).await;
        assert!(matches!(duplicate, Err(RepositoryError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_delivery_repository_in_memory() {
        exercise(DeliveryRepository::new()).await;
    }

    #[tokio::test]
    async fn test_delivery_repository_sqlite() {
        let pool = DatabasePool::in_memory().unwrap();
        exercise(DeliveryRepository::with_pool(pool)).await;
    }
}
