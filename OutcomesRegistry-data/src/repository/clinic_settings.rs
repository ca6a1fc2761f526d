use async_trait::async_trait;

use crate::database::DatabasePool;
use crate::models::clinic::ClinicSettings;
use super::errors::RepositoryError;
use super::in_memory::InMemoryStorage;
use super::resolve_pool;
use super::storage::DatabaseStorage;

/// Repository trait for clinic settings
#[async_trait]
pub trait ClinicSettingsRepositoryTrait: Send + Sync {
    /// The most recently updated settings row, if any
    async fn get_current(&self) -> Result<Option<ClinicSettings>, RepositoryError>;

    /// Insert or replace a settings row
    async fn save(&self, settings: ClinicSettings) -> Result<ClinicSettings, RepositoryError>;
}

/// Clinic settings repository
#[derive(Debug, Clone, Default)]
pub struct ClinicSettingsRepository {
    pool: Option<DatabasePool>,
    storage: InMemoryStorage<ClinicSettings>,
}

impl ClinicSettingsRepository {
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
impl ClinicSettingsRepositoryTrait for ClinicSettingsRepository {
    async fn get_current(&self) -> Result<Option<ClinicSettings>, RepositoryError> {
        match resolve_pool(&self.pool) {
            Some(pool) => DatabaseStorage::get_current_clinic_settings(&pool),
            None => {
                let rows = self.storage.filter(|_| true)?;
                Ok(rows.into_iter().max_by(|a, b| a.updated_at.cmp(&b.updated_at)))
            }
        }
    }

    async fn save(&self, settings: ClinicSettings) -> Result<ClinicSettings, RepositoryError> {
        match resolve_pool(&self.pool) {
            Some(pool) => {
                DatabaseStorage::upsert_clinic_settings(&pool, &settings)?;
                Ok(settings)
            },
            None => self.storage.insert(&settings.id.clone(), settings),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(id: &str, name: &str, updated_at: &str) -> ClinicSettings {
        ClinicSettings {
            id: id.to_string(),
            clinic_name: name.to_string(),
            phone: Some("555-0100".to_string()),
            email: None,
            address: None,
            website: None,
            updated_at: updated_at.to_string(),
        }
    }

    async fn exercise(repo: ClinicSettingsRepository) {
        assert!(repo.get_current().await.unwrap().is_none());

        repo.save(settings("a", "Old Name PT", "2024-01-01T00:00:00+00:00")).await.unwrap();
        repo.save(settings("b", "Summit Neuro & Spine", "2024-06-01T00:00:00+00:00")).await.unwrap();

        let current = repo.get_current().await.unwrap().unwrap();
        assert_eq!(current.clinic_name, "Summit Neuro & Spine");
    }

    #[tokio::test]
    async fn test_latest_settings_win_in_memory() {
        exercise(ClinicSettingsRepository::new()).await;
    }

    #[tokio::test]
    async fn test_latest_settings_win_sqlite() {
        exercise(ClinicSettingsRepository::with_pool(DatabasePool::in_memory().unwrap())).await;
    }
}
