use async_trait::async_trait;

use crate::database::DatabasePool;
use crate::models::provider::PrimaryCareProvider;
use super::errors::RepositoryError;
use super::in_memory::InMemoryStorage;
use super::resolve_pool;
use super::storage::DatabaseStorage;

/// Repository trait for the primary-care provider directory
#[async_trait]
pub trait ProviderRepositoryTrait: Send + Sync {
    async fn add(&self, provider: PrimaryCareProvider) -> Result<PrimaryCareProvider, RepositoryError>;

    /// Case-insensitive substring search over provider and practice names
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<PrimaryCareProvider>, RepositoryError>;
}

/// Provider directory repository
#[derive(Debug, Clone, Default)]
pub struct ProviderRepository {
    pool: Option<DatabasePool>,
    storage: InMemoryStorage<PrimaryCareProvider>,
}

impl ProviderRepository {
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
impl ProviderRepositoryTrait for ProviderRepository {
    async fn add(&self, provider: PrimaryCareProvider) -> Result<PrimaryCareProvider, RepositoryError> {
        match resolve_pool(&self.pool) {
            Some(pool) => {
                DatabaseStorage::insert_provider(&pool, &provider)?;
                Ok(provider)
            },
            None => self.storage.insert(&provider.id.clone(), provider),
        }
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<PrimaryCareProvider>, RepositoryError> {
        match resolve_pool(&self.pool) {
            Some(pool) => DatabaseStorage::search_providers(&pool, query, limit),
            None => {
                let needle = query.to_lowercase();
                let mut matches = self.storage.filter(|p| p.matches(&needle))?;
                matches.sort_by(|a, b| a.name.cmp(&b.name));
                matches.truncate(limit);
                Ok(matches)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(id: &str, name: &str, practice: &str) -> PrimaryCareProvider {
        PrimaryCareProvider {
            id: id.to_string(),
            name: name.to_string(),
            practice_name: Some(practice.to_string()),
            phone: None,
            fax: Some("555-0199".to_string()),
            email: None,
            city: Some("Boulder".to_string()),
        }
    }

    async fn exercise(repo: ProviderRepository) {
        repo.add(provider("1", "Dr. Amelia Hart", "Foothills Family Medicine")).await.unwrap();
        repo.add(provider("2", "Dr. Ben Hartley", "Canyon Internal Medicine")).await.unwrap();
        repo.add(provider("3", "Dr. Chris Ode", "Foothills Family Medicine")).await.unwrap();

        let by_name = repo.search("HART", 10).await.unwrap();
        assert_eq!(by_name.len(), 2);
        assert_eq!(by_name[0].name, "Dr. Amelia Hart");

        let by_practice = repo.search("foothills", 10).await.unwrap();
        assert_eq!(by_practice.len(), 2);

        assert_eq!(repo.search("medicine", 1).await.unwrap().len(), 1);
        assert!(repo.search("pediatrics", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_provider_search_in_memory() {
        exercise(ProviderRepository::new()).await;
    }

    #[tokio::test]
    async fn test_provider_search_sqlite() {
        exercise(ProviderRepository::with_pool(DatabasePool::in_memory().unwrap())).await;
    }

    async fn names(repo: &ProviderRepository, query: &str) -> Vec<String> {
        repo.search(query, 10).await.unwrap().into_iter().map(|p| p.name).collect()
    }

    #[tokio::test]
    async fn test_wildcards_match_literally_on_both_backends() {
        let memory = ProviderRepository::new();
        let sqlite = ProviderRepository::with_pool(DatabasePool::in_memory().unwrap());

        for repo in [&memory, &sqlite] {
            repo.add(provider("1", "Dr. Amelia Hart", "Foothills Family Medicine")).await.unwrap();
            repo.add(provider("2", "Dr. Ben Hartley", "Canyon Internal Medicine")).await.unwrap();
            repo.add(provider("3", "Dr. Dee 100% Care", "North_Side Clinic")).await.unwrap();
        }

        for query in ["%%", "__", "\\", "100%", "h_side", "north_side"] {
            assert_eq!(names(&memory, query).await, names(&sqlite, query).await, "query {:?}", query);
        }

        assert!(names(&sqlite, "%%").await.is_empty());
        assert!(names(&sqlite, "__").await.is_empty());
        assert_eq!(names(&sqlite, "100%").await, vec!["Dr. Dee 100% Care".to_string()]);
        assert_eq!(names(&sqlite, "north_side").await, vec!["Dr. Dee 100% Care".to_string()]);
    }
}
